//! Scenario state for migration search BDD tests.

use devlog::DevlogError;
use devlog::api::models::MigrationResults;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::SharedRuntime;

/// State shared across steps in a migration search scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct SearchState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    /// Trimmed term of the last search.
    pub(crate) term: Slot<String>,
    pub(crate) results: Slot<MigrationResults>,
    pub(crate) error: Slot<DevlogError>,
}

/// Ensures the runtime and server are initialised in `SearchState`.
pub(crate) fn ensure_runtime_and_server(
    search_state: &SearchState,
) -> Result<SharedRuntime, DevlogError> {
    super::runtime::ensure_runtime_and_server(&search_state.runtime, &search_state.server)
        .map_err(|error| DevlogError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })
}
