//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `loading`: Environment and CLI loading through `load_from_iter`
//! - `operation_mode`: View resolution tests
//! - `field_resolution`: Required values and derived request builders
//! - `validation`: Configuration consistency validation tests

mod field_resolution;
mod helpers;
