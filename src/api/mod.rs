//! Client for the source-control history API.
//!
//! All data comes from a JSON-over-HTTP service that owns diff computation,
//! search and aggregation. This module holds the typed payloads, request
//! parameters, the gateway trait with its `reqwest` implementation, and a
//! facade combining calls for the views.

pub mod gateway;
pub mod intake;
pub mod models;
pub mod pagination;
pub mod query;

pub use gateway::{DevlogGateway, HttpGateway};
pub use intake::{CommitPage, DashboardIntake, DashboardOverview};
pub use pagination::OffsetPage;
