//! Pagination primitives shared by the forum backend and its client.
//!
//! The crate owns three things:
//!
//! - validated page coordinates ([`PageNumber`], [`PageSize`],
//!   [`PageRequest`]) so handlers never juggle raw integers;
//! - the [`Page`] response envelope (`records`, `total`, `lastPage`) and the
//!   enablement rules for pagination controls;
//! - [`ListQuery`], the bidirectional binding between list view state and a
//!   shareable query string.
//!
//! Listing endpoints and the client agree on this crate so a bookmarked URL
//! reproduces the same list view on both sides of the wire.

pub mod envelope;
pub mod page;
pub mod query;

pub use envelope::{previous_enabled, Page};
pub use page::{PageNumber, PageRequest, PageSize, PageValidationError};
pub use query::ListQuery;
