//! Bidirectional binding between list view state and the query string.
//!
//! The query string is the persisted representation of a list view: reading
//! a shared URL must reproduce the same view, and every user-driven change
//! writes back. [`ListQuery::parse`] and [`ListQuery::to_query_string`] are
//! pure inverses for values the binding can represent; unknown parameters
//! and malformed values degrade to the defaults instead of failing.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::page::{PageNumber, PageSize};

/// Shareable list view state carried in the URL query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Optional category filter; absent means "all categories".
    pub category_id: Option<i64>,
    /// Current page, 1-indexed.
    pub page: PageNumber,
    /// Page size from the enumerated set.
    pub per_page: PageSize,
    /// Whether the pagination footer is displayed.
    pub show_pagination: bool,
    /// Optional title search text.
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category_id: None,
            page: PageNumber::FIRST,
            per_page: PageSize::default(),
            show_pagination: false,
            search: None,
        }
    }
}

impl ListQuery {
    /// Read list view state from a query string.
    ///
    /// Accepts either a bare `k=v&k=v` string or one with a leading `?`.
    /// Unknown keys are ignored; values that fail validation fall back to
    /// the field default so a hand-edited URL still renders a view.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut out = Self::default();
        let trimmed = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(trimmed.as_bytes()) {
            match key.as_ref() {
                "categoryId" => {
                    out.category_id = value.parse::<i64>().ok().filter(|id| *id > 0);
                }
                "page" => {
                    if let Some(page) = value.parse().ok().and_then(|raw| PageNumber::new(raw).ok())
                    {
                        out.page = page;
                    }
                }
                "perPage" => {
                    if let Some(size) = value.parse().ok().and_then(|raw| PageSize::new(raw).ok()) {
                        out.per_page = size;
                    }
                }
                "showPagination" => {
                    out.show_pagination = matches!(value.as_ref(), "1" | "true");
                }
                "search" => {
                    if !value.is_empty() {
                        out.search = Some(value.into_owned());
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Write the view state back to a query string (no leading `?`).
    ///
    /// Fields at their "absent" defaults (`categoryId`, `search`, a hidden
    /// pagination footer) are omitted to keep shared URLs short.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(id) = self.category_id {
            serializer.append_pair("categoryId", &id.to_string());
        }
        serializer.append_pair("page", &self.page.to_string());
        serializer.append_pair("perPage", &self.per_page.to_string());
        if self.show_pagination {
            serializer.append_pair("showPagination", "1");
        }
        if let Some(search) = &self.search {
            serializer.append_pair("search", search);
        }
        serializer.finish()
    }

    /// The same view on a different page.
    #[must_use]
    pub fn with_page(mut self, page: PageNumber) -> Self {
        self.page = page;
        self
    }

    /// The same view with a different page size.
    ///
    /// The current page number is preserved deliberately, matching the
    /// shipped behaviour of the listing UI.
    #[must_use]
    pub fn with_per_page(mut self, per_page: PageSize) -> Self {
        self.per_page = per_page;
        self
    }

    /// The same view filtered to `category_id`.
    #[must_use]
    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }
}
