//! Sync job views: start and follow, status, and cancel.

use std::io::Write;

use devlog::api::models::{SyncHistory, SyncRun, display_timestamp};
use devlog::telemetry::TelemetrySink;
use devlog::{DevlogConfig, DevlogError, DevlogGateway, SyncMonitor, SyncOutcome, SyncReport};
use tokio::signal;

use super::output::{blank, line};

/// Starts a sync job and streams its log until it ends.
///
/// Ctrl-C stops monitoring and asks the server to cancel the job.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] for an unknown sync mode and
/// propagates start and output failures. Poll failures end monitoring
/// without an error.
pub async fn run<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let request = config.sync_request()?;
    let (mut monitor, cancel) = SyncMonitor::new(gateway, config.poll_settings(), telemetry);
    let interrupt = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let result = monitor.run(&request, writer).await;
    interrupt.abort();
    let (started, report) = result?;

    if let Some(message) = started.message.as_deref() {
        line(writer, message)?;
    }
    write_report(writer, &report)
}

fn write_report<W: Write>(writer: &mut W, report: &SyncReport) -> Result<(), DevlogError> {
    blank(writer)?;
    match &report.outcome {
        SyncOutcome::Completed => line(
            writer,
            &format!("Sync completed ({} log lines)", report.lines_received),
        ),
        SyncOutcome::PossiblyStillRunning { last_error } => line(
            writer,
            &format!(
                "Lost contact with the sync job after {} polls; it may still be running ({last_error})",
                report.polls
            ),
        ),
        SyncOutcome::Cancelled { ack: Some(ack) } => line(
            writer,
            &format!(
                "Sync cancelled: {}",
                ack.message.as_deref().unwrap_or(&ack.status)
            ),
        ),
        SyncOutcome::Cancelled { ack: None } => line(
            writer,
            "Monitoring stopped; the server did not confirm cancellation",
        ),
    }
}

/// Prints whether a job is running and the recent sync runs.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn status<G: DevlogGateway, W: Write>(
    gateway: &G,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let running = gateway.sync_running().await?;
    let history = gateway.sync_history().await?;
    let state = if running.running { "running" } else { "idle" };
    line(writer, &format!("Sync job: {state}"))?;
    write_history(writer, &history)
}

fn write_history<W: Write>(writer: &mut W, history: &SyncHistory) -> Result<(), DevlogError> {
    if let Some(error) = history.error.as_deref() {
        line(writer, &format!("History unavailable: {error}"))?;
    }
    if let Some(last) = history.last_fetch.as_ref() {
        line(writer, &format!("Last sync: {}", describe_run(last)))?;
    }
    if history.logs.is_empty() {
        return line(writer, "No sync runs recorded");
    }
    blank(writer)?;
    line(writer, "Recent runs")?;
    for run in &history.logs {
        line(writer, &format!("  {}", describe_run(run)))?;
    }
    Ok(())
}

fn describe_run(run: &SyncRun) -> String {
    let mut text = format!(
        "#{} {} {} {} commits",
        run.id,
        run.status.as_deref().unwrap_or("unknown"),
        display_timestamp(run.started_at.as_deref()),
        run.commits_imported
    );
    if let Some(branch) = run.branch_name.as_deref() {
        text.push_str(&format!(" on {branch}"));
    }
    if let Some(error) = run.error_message.as_deref() {
        text.push_str(&format!(" ({error})"));
    }
    text
}

/// Asks the server to stop the running job.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn cancel<G: DevlogGateway, W: Write>(
    gateway: &G,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let ack = gateway.cancel_sync().await?;
    line(
        writer,
        &format!(
            "Cancel {}: {}",
            ack.status,
            ack.message.as_deref().unwrap_or("request sent")
        ),
    )
}
