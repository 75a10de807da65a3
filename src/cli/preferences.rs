//! Favorite-commit views backed by the local preference store.

use std::io::Write;

use devlog::api::models::{display_timestamp, first_line, or_unknown, short_sha};
use devlog::persistence::{Favorite, Favorites, PreferenceStore};
use devlog::{DevlogConfig, DevlogError, DevlogGateway};
use tracing::debug;

use super::output::{TITLE_WIDTH, fit_width, line};

/// Opens the preference store at the configured database path.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] when no usable path is set.
pub fn open_store(config: &DevlogConfig) -> Result<PreferenceStore, DevlogError> {
    Ok(PreferenceStore::new(config.require_database_url()?)?)
}

/// Lists bookmarked commits, newest first.
///
/// # Errors
///
/// Propagates storage and output failures.
pub fn list<W: Write>(config: &DevlogConfig, writer: &mut W) -> Result<(), DevlogError> {
    let favorites = Favorites::load(&open_store(config)?)?;
    if favorites.is_empty() {
        return line(writer, "No favorites yet");
    }
    line(writer, &format!("Favorites ({})", favorites.len()))?;
    for (index, favorite) in favorites.entries().iter().enumerate() {
        write_favorite(writer, index, favorite)?;
    }
    Ok(())
}

/// Fetches the configured commit and bookmarks it.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a commit id or database
/// path and propagates gateway and storage failures.
pub async fn add<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let store = open_store(config)?;
    let detail = gateway.commit(config.require_commit_id()?).await?;
    let mut favorites = Favorites::load(&store)?;
    let favorite = Favorite::from_commit(&detail.commit);
    let summary = format!(
        "{} {}",
        short_sha(&favorite.sha),
        first_line(&favorite.message)
    );
    favorites.add(favorite);
    favorites.save(&store)?;
    debug!(commit_id = detail.commit.id, total = favorites.len(), "favorite saved");
    line(writer, &format!("Added to favorites: {summary}"))
}

/// Removes a bookmark by list position or by commit id.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] when neither `--index` nor
/// `--commit-id` is set and [`DevlogError::NotFound`] when nothing matches.
pub fn remove<W: Write>(config: &DevlogConfig, writer: &mut W) -> Result<(), DevlogError> {
    let store = open_store(config)?;
    let mut favorites = Favorites::load(&store)?;
    let removed = match (config.index, config.commit_id) {
        (Some(index), _) => favorites.remove_at(index),
        (None, Some(commit_id)) => favorites.remove_id(commit_id),
        (None, None) => {
            return Err(DevlogError::Configuration {
                message: "favorite to remove is required (use --index or --commit-id)".to_owned(),
            });
        }
    }
    .ok_or_else(|| DevlogError::NotFound {
        message: "no matching favorite".to_owned(),
    })?;
    favorites.save(&store)?;
    line(
        writer,
        &format!("Removed from favorites: {}", short_sha(&removed.sha)),
    )
}

fn write_favorite<W: Write>(
    writer: &mut W,
    index: usize,
    favorite: &Favorite,
) -> Result<(), DevlogError> {
    line(
        writer,
        &format!(
            "  [{index}] {} {} {} {}",
            short_sha(&favorite.sha),
            display_timestamp(favorite.date.as_deref()),
            or_unknown(favorite.author.as_deref()),
            fit_width(first_line(&favorite.message), TITLE_WIDTH)
        ),
    )
}
