//! The paged response envelope returned by listing endpoints.
//!
//! Serialises as `{"records": [...], "total": N, "lastPage": N}`, the shape
//! the client's pagination controls are driven from.

use serde::{Deserialize, Serialize};

use crate::page::{PageNumber, PageSize};

/// One page of records plus enough shape to drive pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The records for the requested page, in listing order.
    pub records: Vec<T>,
    /// Total number of records matching the filters across all pages.
    pub total: u64,
    /// The last populated page; 0 when there are no records at all.
    pub last_page: u32,
}

impl<T> Page<T> {
    /// Build an envelope, deriving `lastPage` from `total` and `per_page`.
    #[must_use]
    pub fn new(records: Vec<T>, total: u64, per_page: PageSize) -> Self {
        let last_page = u32::try_from(total.div_ceil(u64::from(per_page.get()))).unwrap_or(u32::MAX);
        Self {
            records,
            total,
            last_page,
        }
    }

    /// An envelope with no records.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            last_page: 0,
        }
    }

    /// Whether the current page carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a "Next" control should be active when viewing `page`.
    ///
    /// Disabled on the last page and whenever the current page came back
    /// empty (a stale URL can point past the end of the result set).
    #[must_use]
    pub fn next_enabled(&self, page: PageNumber) -> bool {
        !self.records.is_empty() && page.get() < self.last_page
    }

    /// One-based record range shown in the listing footer, as
    /// `(first, last)`. `None` when the page is empty.
    #[must_use]
    pub fn record_range(&self, page: PageNumber, per_page: PageSize) -> Option<(u64, u64)> {
        if self.records.is_empty() {
            return None;
        }
        let first = u64::from(page.get() - 1) * u64::from(per_page.get()) + 1;
        let last = first + self.records.len() as u64 - 1;
        Some((first, last))
    }
}

/// Whether a "Previous" control should be active when viewing `page`.
#[must_use]
pub fn previous_enabled(page: PageNumber) -> bool {
    page > PageNumber::FIRST
}
