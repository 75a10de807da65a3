//! Starting and following server-side sync jobs.
//!
//! A sync job imports commits on the server. The client starts it, then
//! polls the job log on a fixed interval and streams new lines to a writer
//! until the job ends, polling keeps failing, or the user cancels.

mod monitor;

pub use monitor::{
    CancelHandle, DEFAULT_MAX_POLL_FAILURES, DEFAULT_POLL_INTERVAL, PollSettings, SyncMonitor,
    SyncOutcome, SyncReport,
};
