//! Search-as-you-type over terms read one per line.
//!
//! Lines arriving within [`MIGRATION_SEARCH_DELAY`] of each other collapse
//! into one search. Searches are never cancelled: each result is printed
//! when it resolves, so a slow older search can land after a newer one. Such
//! results are flagged as stale.

use std::io::Write;

use devlog::api::models::{CommitType, MigrationResults};
use devlog::api::query::MigrationQuery;
use devlog::session::{Generation, MIGRATION_SEARCH_DELAY, ResponseSlot, debounced};
use devlog::{DevlogConfig, DevlogError, DevlogGateway};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::migration::{remember, write_results};
use super::output::{blank, line};
use super::taxonomy;

type Settled = (
    Generation,
    MigrationQuery,
    Result<MigrationResults, DevlogError>,
);

/// Runs a migration search for every settled term read from `input`.
///
/// Version, module and pattern options come from the configuration; each
/// line replaces the term.
///
/// # Errors
///
/// Returns [`DevlogError::Io`] when output fails or a search task aborts.
/// Failed searches are reported inline and do not stop the view.
pub async fn run<G, R, W>(
    gateway: &G,
    config: &DevlogConfig,
    input: R,
    writer: &mut W,
) -> Result<(), DevlogError>
where
    G: DevlogGateway + Clone + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (keystrokes, mut debouncer) = debounced::<String>(MIGRATION_SEARCH_DELAY);
    let (settled_tx, settled_rx) = mpsc::unbounded_channel();

    let read = async move {
        let mut lines = input.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(term)) => {
                    if !keystrokes.submit(term) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    warn!(%error, "stopped reading search terms");
                    break;
                }
            }
        }
        Ok::<(), DevlogError>(())
    };
    let settle = async move {
        while let Some(term) = debouncer.next().await {
            if settled_tx.send(term).is_err() {
                break;
            }
        }
        Ok::<(), DevlogError>(())
    };
    let search = search_settled(gateway, config, settled_rx, writer);

    tokio::try_join!(read, settle, search).map(|((), (), ())| ())
}

async fn search_settled<G, W>(
    gateway: &G,
    config: &DevlogConfig,
    mut terms: mpsc::UnboundedReceiver<String>,
    writer: &mut W,
) -> Result<(), DevlogError>
where
    G: DevlogGateway + Clone + 'static,
    W: Write,
{
    let types = taxonomy::load(gateway).await;
    let mut slot = ResponseSlot::default();
    let mut in_flight: JoinSet<Settled> = JoinSet::new();
    let mut reading = true;

    loop {
        tokio::select! {
            term = terms.recv(), if reading => match term {
                Some(term) => issue(gateway, config, &term, &mut slot, &mut in_flight, writer)?,
                None => reading = false,
            },
            Some(joined) = in_flight.join_next() => {
                let (generation, query, outcome) = joined.map_err(|error| DevlogError::Io {
                    message: format!("search task failed: {error}"),
                })?;
                show(writer, config, &types, &mut slot, generation, &query, outcome)?;
            }
            else => break,
        }
    }
    Ok(())
}

fn issue<G, W>(
    gateway: &G,
    config: &DevlogConfig,
    term: &str,
    slot: &mut ResponseSlot<MigrationResults>,
    in_flight: &mut JoinSet<Settled>,
    writer: &mut W,
) -> Result<(), DevlogError>
where
    G: DevlogGateway + Clone + 'static,
    W: Write,
{
    let mut form = config.migration_form();
    form.set_term(term);
    let query = match form.build_query() {
        Ok(query) => query,
        Err(error) => return line(writer, &format!("Skipped '{}': {error}", term.trim())),
    };

    let generation = slot.issue();
    debug!(
        term = query.trimmed_term(),
        generation = generation.get(),
        "search issued"
    );
    let client = gateway.clone();
    in_flight.spawn(async move {
        let outcome = client.migration_search(&query).await;
        (generation, query, outcome)
    });
    Ok(())
}

fn show<W: Write>(
    writer: &mut W,
    config: &DevlogConfig,
    types: &[CommitType],
    slot: &mut ResponseSlot<MigrationResults>,
    generation: Generation,
    query: &MigrationQuery,
    outcome: Result<MigrationResults, DevlogError>,
) -> Result<(), DevlogError> {
    let term = query.trimmed_term();
    let results = match outcome {
        Ok(results) => results,
        Err(error) => return line(writer, &format!("Search for '{term}' failed: {error}")),
    };

    remember(config, query);
    blank(writer)?;
    line(
        writer,
        &format!(
            "Search '{term}' ({} -> {})",
            query.from_version.trim(),
            query.to_version.trim()
        ),
    )?;
    write_results(writer, query, &results, types)?;
    slot.apply(generation, results);
    if slot.is_stale() {
        line(
            writer,
            &format!("(stale: '{term}' finished after a newer search was issued)"),
        )?;
    }
    Ok(())
}
