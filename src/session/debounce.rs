//! Quiescence-based debouncing of user input.
//!
//! Values are pushed through a [`DebounceInput`] and read back from the
//! paired [`Debouncer`], which yields only the last value of each burst once
//! no new value has arrived for the configured delay.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

/// Quiet period before a commit filter change is applied.
pub const COMMIT_FILTER_DELAY: Duration = Duration::from_millis(500);
/// Quiet period before a migration search runs.
pub const MIGRATION_SEARCH_DELAY: Duration = Duration::from_millis(800);
/// Quiet period before suggestions refresh.
pub const SUGGESTION_DELAY: Duration = Duration::from_millis(300);

/// Creates a connected input and debouncer pair.
#[must_use]
pub fn debounced<T>(delay: Duration) -> (DebounceInput<T>, Debouncer<T>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (DebounceInput { sender }, Debouncer { receiver, delay })
}

/// Sending half of a debounced stream.
#[derive(Debug)]
pub struct DebounceInput<T> {
    sender: mpsc::UnboundedSender<T>,
}

impl<T> Clone for DebounceInput<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> DebounceInput<T> {
    /// Submits a value. Returns false once the debouncer is gone.
    pub fn submit(&self, value: T) -> bool {
        self.sender.send(value).is_ok()
    }
}

/// Receiving half that collapses bursts.
#[derive(Debug)]
pub struct Debouncer<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    delay: Duration,
}

impl<T> Debouncer<T> {
    /// Quiet period this debouncer waits for.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the next burst and returns its last value.
    ///
    /// A pending burst is flushed when every input is dropped. Returns
    /// `None` once all inputs are dropped and nothing is pending.
    pub async fn next(&mut self) -> Option<T> {
        let mut latest = self.receiver.recv().await?;
        loop {
            match timeout(self.delay, self.receiver.recv()).await {
                Ok(Some(value)) => latest = value,
                Ok(None) | Err(_) => return Some(latest),
            }
        }
    }
}
