//! Offset pagination for commit listings.
//!
//! The API pages by `limit`/`offset`. It never reports totals, so a next
//! page is assumed to exist whenever the last page came back full.

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Current page position for offset-paginated results.
///
/// # Example
///
/// ```
/// use devlog::api::pagination::OffsetPage;
///
/// let page = OffsetPage::new(2, 100).with_result_count(100);
/// assert_eq!(page.offset(), 200);
/// assert!(page.has_next());
/// assert!(page.has_prev());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPage {
    /// Current page number (0-based).
    index: u32,
    /// Rows per page.
    size: u32,
    /// Whether the last response filled the page.
    has_next: bool,
}

impl OffsetPage {
    /// Creates a page position with unknown next-page availability.
    ///
    /// A zero page size is raised to one.
    #[must_use]
    pub const fn new(index: u32, size: u32) -> Self {
        Self {
            index,
            size: if size == 0 { 1 } else { size },
            has_next: false,
        }
    }

    /// Records how many rows the page returned.
    #[must_use]
    pub const fn with_result_count(mut self, count: usize) -> Self {
        self.has_next = count as u64 == self.size as u64;
        self
    }

    /// Returns the current page number (0-based).
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Returns the page size sent as `limit`.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the row offset of the first item.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.index as u64 * self.size as u64
    }

    /// Returns true if the last response filled the page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns true if this is not the first page.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.index > 0
    }

    /// The following page, if one exists.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        if self.has_next {
            Some(Self::new(self.index.saturating_add(1), self.size))
        } else {
            None
        }
    }

    /// The preceding page, if one exists.
    #[must_use]
    pub const fn prev(&self) -> Option<Self> {
        if self.index > 0 {
            Some(Self::new(self.index - 1, self.size))
        } else {
            None
        }
    }

    /// The first page at the same size.
    #[must_use]
    pub const fn first(&self) -> Self {
        Self::new(0, self.size)
    }
}

impl Default for OffsetPage {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}
