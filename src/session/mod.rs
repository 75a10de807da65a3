//! Client-side view state.
//!
//! Selections, filters and paging for the browsing views, the migration
//! search form, input debouncing and response ordering. Nothing here talks
//! to the network; callers turn the state into queries for the gateway.

pub mod browse;
pub mod compare;
pub mod debounce;
pub mod migration;
pub mod ordering;

pub use browse::{CommitBrowser, CommitFilters};
pub use compare::CompareSelection;
pub use debounce::{
    COMMIT_FILTER_DELAY, DebounceInput, Debouncer, MIGRATION_SEARCH_DELAY, SUGGESTION_DELAY,
    debounced,
};
pub use migration::{MigrationForm, highlighted_suggestions, suggestions};
pub use ordering::{Generation, ResponseSlot};
