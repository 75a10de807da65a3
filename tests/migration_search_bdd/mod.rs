//! Support modules for the migration search BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{SearchState, ensure_runtime_and_server};
