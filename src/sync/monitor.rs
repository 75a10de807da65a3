//! Log polling loop for a running sync job.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::gateway::DevlogGateway;
use crate::api::models::{CancelAck, SyncRequest, SyncStarted};
use crate::error::{DevlogError, io_error};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Time between log polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Failed polls in a row after which monitoring stops.
pub const DEFAULT_MAX_POLL_FAILURES: u32 = 3;

/// Polling cadence and failure tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay before each poll.
    pub interval: Duration,
    /// Consecutive failures tolerated before giving up.
    pub max_consecutive_failures: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_consecutive_failures: DEFAULT_MAX_POLL_FAILURES,
        }
    }
}

impl PollSettings {
    /// Builds settings from raw configuration values.
    ///
    /// A zero failure budget is raised to one.
    #[must_use]
    pub fn new(interval: Duration, max_consecutive_failures: u32) -> Self {
        Self {
            interval,
            max_consecutive_failures: max_consecutive_failures.max(1),
        }
    }
}

/// How monitoring ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The server reported the job finished.
    Completed,
    /// Polling failed repeatedly; the job may still be running.
    PossiblyStillRunning {
        /// Error from the last failed poll.
        last_error: DevlogError,
    },
    /// Monitoring was cancelled and a stop request was sent.
    Cancelled {
        /// Server acknowledgement, if the stop request succeeded.
        ack: Option<CancelAck>,
    },
}

impl SyncOutcome {
    /// Stable name used in telemetry.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::PossiblyStillRunning { .. } => "possibly_still_running",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// Summary of one monitoring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// How monitoring ended.
    pub outcome: SyncOutcome,
    /// Log position reached.
    pub last_position: u64,
    /// Log lines written to the sink.
    pub lines_received: u64,
    /// Polls attempted.
    pub polls: u64,
}

/// Requests cancellation of a running [`SyncMonitor`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals the monitor to stop.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

#[derive(Debug, Default)]
struct PollProgress {
    position: u64,
    failures: u32,
    lines: u64,
    polls: u64,
}

impl PollProgress {
    const fn starting_at(position: u64) -> Self {
        Self {
            position,
            failures: 0,
            lines: 0,
            polls: 0,
        }
    }

    const fn into_report(self, outcome: SyncOutcome) -> SyncReport {
        SyncReport {
            outcome,
            last_position: self.position,
            lines_received: self.lines,
            polls: self.polls,
        }
    }
}

/// Follows a sync job's log until it ends.
pub struct SyncMonitor<'client, Gateway>
where
    Gateway: DevlogGateway,
{
    client: &'client Gateway,
    settings: PollSettings,
    telemetry: &'client dyn TelemetrySink,
    cancel: watch::Receiver<bool>,
}

impl<'client, Gateway> SyncMonitor<'client, Gateway>
where
    Gateway: DevlogGateway,
{
    /// Creates a monitor and the handle that cancels it.
    #[must_use]
    pub fn new(
        client: &'client Gateway,
        settings: PollSettings,
        telemetry: &'client dyn TelemetrySink,
    ) -> (Self, CancelHandle) {
        let (sender, cancel) = watch::channel(false);
        (
            Self {
                client,
                settings,
                telemetry,
                cancel,
            },
            CancelHandle { sender },
        )
    }

    /// Starts a job and follows its log from the beginning.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the job cannot be started, or
    /// [`DevlogError::Io`] when the log sink cannot be written.
    pub async fn run<W: Write>(
        &mut self,
        request: &SyncRequest,
        log: &mut W,
    ) -> Result<(SyncStarted, SyncReport), DevlogError> {
        let started = self.client.start_sync(request).await?;
        info!(
            mode = %request.mode,
            status = %started.status,
            "sync job started"
        );
        let report = self.follow(0, log).await?;
        Ok((started, report))
    }

    /// Follows the job log from `position`.
    ///
    /// Poll failures are tolerated until the configured budget is spent; a
    /// successful poll resets the count.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Io`] when the log sink cannot be written.
    pub async fn follow<W: Write>(
        &mut self,
        position: u64,
        log: &mut W,
    ) -> Result<SyncReport, DevlogError> {
        let mut progress = PollProgress::starting_at(position);
        let outcome = self.poll_until_done(&mut progress, log).await?;
        let report = progress.into_report(outcome);

        self.telemetry.record(TelemetryEvent::SyncFinished {
            outcome: report.outcome.name().to_owned(),
            lines_received: report.lines_received,
            polls: report.polls,
        });
        Ok(report)
    }

    async fn poll_until_done<W: Write>(
        &mut self,
        progress: &mut PollProgress,
        log: &mut W,
    ) -> Result<SyncOutcome, DevlogError> {
        loop {
            tokio::select! {
                biased;
                () = cancelled(&mut self.cancel) => return Ok(self.cancel_job().await),
                () = sleep(self.settings.interval) => {}
            }

            let result = tokio::select! {
                biased;
                () = cancelled(&mut self.cancel) => return Ok(self.cancel_job().await),
                result = self.client.sync_logs(progress.position) => result,
            };
            progress.polls += 1;

            match result {
                Ok(chunk) => {
                    progress.failures = 0;
                    for line in &chunk.logs {
                        writeln!(log, "{line}").map_err(|error| io_error(&error))?;
                    }
                    progress.lines += chunk.logs.len() as u64;
                    progress.position = chunk.position.max(progress.position);
                    debug!(
                        position = progress.position,
                        received = chunk.logs.len(),
                        running = chunk.running,
                        "polled sync log"
                    );
                    if !chunk.running {
                        return Ok(SyncOutcome::Completed);
                    }
                }
                Err(error) => {
                    progress.failures += 1;
                    warn!(
                        %error,
                        failures = progress.failures,
                        "sync log poll failed"
                    );
                    if progress.failures >= self.settings.max_consecutive_failures {
                        return Ok(SyncOutcome::PossiblyStillRunning { last_error: error });
                    }
                }
            }
        }
    }

    async fn cancel_job(&self) -> SyncOutcome {
        let ack = self
            .client
            .cancel_sync()
            .await
            .inspect_err(|error| warn!(%error, "stop request failed; monitoring stopped locally"))
            .ok();
        SyncOutcome::Cancelled { ack }
    }
}

/// Resolves once cancellation is requested; never resolves if the handle is
/// dropped without cancelling.
async fn cancelled(receiver: &mut watch::Receiver<bool>) {
    if receiver.wait_for(|flag| *flag).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
