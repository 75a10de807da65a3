//! Commit-type labels for listing views.

use devlog::DevlogGateway;
use devlog::api::models::CommitType;
use devlog::diff::{find_commit_type, split_commit_type};
use tracing::warn;

/// Fetches the commit-type taxonomy once per view.
///
/// A failed fetch only costs the labels, so it is logged and an empty
/// taxonomy is returned.
pub async fn load<G: DevlogGateway>(gateway: &G) -> Vec<CommitType> {
    match gateway.commit_types().await {
        Ok(types) => types,
        Err(error) => {
            warn!(%error, "commit types unavailable; listing without labels");
            Vec::new()
        }
    }
}

/// `title` with a known `[CODE]` prefix expanded to `[CODE Label]`.
pub fn typed_title(title: &str, taxonomy: &[CommitType]) -> String {
    find_commit_type(title, taxonomy)
        .zip(split_commit_type(title))
        .map_or_else(
            || title.to_owned(),
            |(commit_type, (code, rest))| format!("[{code} {}] {rest}", commit_type.label),
        )
}

/// `CODE (Label)` for the commit type of `message`, when known.
pub fn type_label(message: &str, taxonomy: &[CommitType]) -> Option<String> {
    find_commit_type(message, taxonomy)
        .map(|commit_type| format!("{} ({})", commit_type.code, commit_type.label))
}
