//! Structured procedure errors and failure-payload normalisation.
//!
//! The server replies to failed procedures with a `{code, message, details}`
//! envelope, but nothing guarantees a failure body actually has that shape:
//! proxies, crashes, and HTML error pages all end up here too. Extraction is
//! therefore a tagged step — [`FailurePayload::Known`] when the body parses,
//! [`FailurePayload::Unparseable`] otherwise — and the unparseable arm is
//! normalised into a generic structured error instead of surfacing a serde
//! failure to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Machine-readable error category, mirroring the server's envelope.
///
/// Unrecognised codes deserialise as [`ErrorCode::Unknown`] so a newer
/// server cannot break an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected server-side error.
    InternalError,
    /// A code this client version does not recognise.
    #[serde(other)]
    Unknown,
}

/// Structured error observed by callers of the procedure client.
///
/// `path` and `http_status` are contextual metadata attached on the client
/// side; the server only ships `code`, `message`, and `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ProcedureError {
    /// Stable failure category.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Supplementary structured details (field-level validation context).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Procedure path the failure originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// HTTP status observed, when the failure came over the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}

impl ProcedureError {
    /// Construct an error with just a code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            path: None,
            http_status: None,
        }
    }

    /// Convenience constructor for client-side internal failures.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach the originating procedure path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the observed HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }
}

/// Tagged outcome of parsing a failure body.
#[derive(Debug, Clone, PartialEq)]
pub enum FailurePayload {
    /// The body carried the structured error envelope.
    Known(ProcedureError),
    /// The body had some other shape; a preview is kept for diagnostics.
    Unparseable(String),
}

impl FailurePayload {
    /// Classify a raw failure body.
    pub fn classify(body: &[u8]) -> Self {
        match serde_json::from_slice::<ProcedureError>(body) {
            Ok(error) => Self::Known(error),
            Err(_) => Self::Unparseable(body_preview(body)),
        }
    }

    /// Normalise into a structured error, substituting a generic one for
    /// payloads the envelope parser rejected.
    pub fn into_error(self) -> ProcedureError {
        match self {
            Self::Known(error) => error,
            Self::Unparseable(preview) => {
                tracing::warn!(preview = %preview, "unparseable failure payload from server");
                let mut error =
                    ProcedureError::internal("server returned an unrecognised error payload");
                if !preview.is_empty() {
                    error.details = Some(serde_json::json!({ "bodyPreview": preview }));
                }
                error
            }
        }
    }
}

/// Compact single-line preview of a response body for diagnostics.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn well_formed_envelope_is_classified_as_known() {
        let body = br#"{"code":"forbidden","message":"admin role required"}"#;
        let payload = FailurePayload::classify(body);
        let error = payload.into_error();
        assert_eq!(error.code, ErrorCode::Forbidden);
        assert_eq!(error.message, "admin role required");
    }

    #[rstest]
    #[case::html(b"<html><body>502 Bad Gateway</body></html>".as_slice())]
    #[case::truncated_json(br#"{"code":"not_"#.as_slice())]
    #[case::empty(b"".as_slice())]
    fn malformed_payloads_normalise_instead_of_propagating(#[case] body: &[u8]) {
        let error = FailurePayload::classify(body).into_error();
        assert_eq!(error.code, ErrorCode::InternalError);
        assert!(!error.message.is_empty());
    }

    #[test]
    fn unparseable_payloads_keep_a_body_preview() {
        let error = FailurePayload::classify(b"upstream exploded").into_error();
        let details = error.details.expect("preview details");
        assert_eq!(details["bodyPreview"], "upstream exploded");
    }

    #[test]
    fn unknown_codes_deserialise_to_the_unknown_variant() {
        let error: ProcedureError =
            serde_json::from_str(r#"{"code":"teapot","message":"short and stout"}"#)
                .expect("lenient code parse");
        assert_eq!(error.code, ErrorCode::Unknown);
    }

    #[test]
    fn long_previews_are_truncated() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }
}
