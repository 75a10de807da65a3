//! Scenario state for sync monitoring BDD tests.

use devlog::DevlogError;
use devlog::SyncReport;
use devlog::api::models::SyncStarted;
use devlog::telemetry::TelemetryEvent;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::{Mock, MockServer};

use super::runtime::SharedRuntime;

/// State shared across steps in a sync monitoring scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct SyncState {
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock admin API.
    pub(crate) server: Slot<MockServer>,
    pub(crate) started: Slot<SyncStarted>,
    pub(crate) report: Slot<SyncReport>,
    /// Error returned instead of a report.
    pub(crate) error: Slot<DevlogError>,
    /// Log lines written by the monitor.
    pub(crate) log: Slot<String>,
    pub(crate) events: Slot<Vec<TelemetryEvent>>,
}

/// Ensures the runtime and server are initialised in `SyncState`.
pub(crate) fn ensure_runtime_and_server(
    sync_state: &SyncState,
) -> Result<SharedRuntime, DevlogError> {
    super::runtime::ensure_runtime_and_server(&sync_state.runtime, &sync_state.server).map_err(
        |error| DevlogError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        },
    )
}

/// Mounts `mock` on the scenario's server.
pub(crate) fn mount(sync_state: &SyncState, mock: Mock) -> Result<(), DevlogError> {
    let runtime = ensure_runtime_and_server(sync_state)?;
    sync_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or_else(|| DevlogError::Io {
            message: "mock server not initialised".to_owned(),
        })
}
