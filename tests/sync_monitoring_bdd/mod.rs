//! Support modules for the sync monitoring BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{SyncState, ensure_runtime_and_server, mount};
