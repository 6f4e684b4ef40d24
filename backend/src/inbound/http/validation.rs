//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection carries `{"field": ..., "code": ...}` details so clients
//! can surface the failure beside the offending form control.

use pagination::{PageNumber, PageSize, PageValidationError};
use serde_json::json;

use crate::domain::post::TITLE_MAX;
use crate::domain::{DomainError, PostTitle, PostValidationError};

/// Build an `invalid_request` error with field-level details.
pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> DomainError {
    DomainError::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Parse and validate a post title from a request body.
pub(crate) fn parse_title(raw: &str) -> Result<PostTitle, DomainError> {
    PostTitle::new(raw).map_err(|error| match error {
        PostValidationError::EmptyTitle => field_error("title", "empty_title", "title is required"),
        PostValidationError::TitleTooLong { .. } => field_error(
            "title",
            "title_too_long",
            format!("title must be at most {TITLE_MAX} characters"),
        ),
    })
}

/// Parse an optional `page` query parameter, defaulting to the first page.
pub(crate) fn parse_page(raw: Option<u32>) -> Result<PageNumber, DomainError> {
    match raw {
        None => Ok(PageNumber::FIRST),
        Some(value) => PageNumber::new(value).map_err(page_error),
    }
}

/// Parse an optional `perPage` query parameter, defaulting to ten.
pub(crate) fn parse_per_page(raw: Option<u32>) -> Result<PageSize, DomainError> {
    match raw {
        None => Ok(PageSize::default()),
        Some(value) => PageSize::new(value).map_err(page_error),
    }
}

fn page_error(error: PageValidationError) -> DomainError {
    match error {
        PageValidationError::ZeroPage => {
            field_error("page", "invalid_page", "page numbers start at 1")
        }
        PageValidationError::UnsupportedPageSize { value } => field_error(
            "perPage",
            "invalid_page_size",
            format!("{value} is not a supported page size"),
        ),
    }
}

/// Require a non-blank text field, trimming surrounding whitespace.
pub(crate) fn require_text(field: &'static str, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(field_error(
            field,
            "missing_field",
            format!("{field} must not be empty"),
        ));
    }
    Ok(trimmed.to_owned())
}
