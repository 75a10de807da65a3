//! devlog library crate: a client for a commit-history API.
//!
//! The library wraps the HTTP API behind a mockable gateway, turns raw patch
//! text into unified and side-by-side views with search-term highlighting,
//! follows server-side sync jobs, exports result sets, and keeps search
//! history and favorite commits in a local `SQLite` database.

pub mod api;
pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod persistence;
pub mod session;
pub mod sync;
pub mod telemetry;

pub use api::{CommitPage, DashboardIntake, DashboardOverview, DevlogGateway, HttpGateway};
pub use config::{DevlogConfig, OperationMode};
pub use error::DevlogError;
pub use persistence::PersistenceError;
pub use sync::{PollSettings, SyncMonitor, SyncOutcome, SyncReport};
