//! Response application for overlapping requests.
//!
//! Requests are never cancelled. Each response is applied when it resolves,
//! so a slow earlier request can overwrite the result of a faster later one.
//! The slot remembers which request produced the visible value so callers
//! can tell when that has happened.

/// Sequence number handed out per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Holds the most recently applied response for one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSlot<T> {
    issued: u64,
    applied: Option<Generation>,
    value: Option<T>,
}

impl<T> Default for ResponseSlot<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            applied: None,
            value: None,
        }
    }
}

impl<T> ResponseSlot<T> {
    /// Registers a new request and returns its generation.
    pub const fn issue(&mut self) -> Generation {
        self.issued = self.issued.saturating_add(1);
        Generation(self.issued)
    }

    /// Newest generation handed out.
    #[must_use]
    pub const fn latest(&self) -> Option<Generation> {
        if self.issued == 0 {
            None
        } else {
            Some(Generation(self.issued))
        }
    }

    /// Applies a resolved response, whatever its generation.
    pub fn apply(&mut self, generation: Generation, value: T) {
        self.applied = Some(generation);
        self.value = Some(value);
    }

    /// Generation of the visible value.
    #[must_use]
    pub const fn applied(&self) -> Option<Generation> {
        self.applied
    }

    /// Visible value.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Returns true when the visible value came from an older request than
    /// the newest one issued.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.applied
            .is_some_and(|applied| applied.get() < self.issued)
    }
}
