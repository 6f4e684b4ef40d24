//! OpenAPI schema definitions for paged responses.
//!
//! The pagination crate stays framework-agnostic and does not derive
//! `ToSchema`; these wrappers mirror its envelope for documentation
//! purposes only.

use utoipa::ToSchema;

use crate::domain::{Category, PostSummary};

/// OpenAPI schema for a page of post summaries.
#[derive(ToSchema)]
#[schema(as = PostPage)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostPageSchema {
    /// The records for the requested page, in listing order.
    records: Vec<PostSummary>,
    /// Total number of records matching the filters across all pages.
    #[schema(example = 42)]
    total: u64,
    /// The last populated page; 0 when there are no records at all.
    #[schema(rename = "lastPage", example = 5)]
    last_page: u32,
}

/// OpenAPI schema for a page of categories.
#[derive(ToSchema)]
#[schema(as = CategoryPage)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategoryPageSchema {
    /// All categories, in display order.
    records: Vec<Category>,
    /// Number of categories.
    #[schema(example = 2)]
    total: u64,
    /// Always 1 when any category exists; 0 otherwise.
    #[schema(rename = "lastPage", example = 1)]
    last_page: u32,
}
