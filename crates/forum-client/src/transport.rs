//! Transport port and the reqwest adapter.
//!
//! The port keeps the client testable without a network: the state machine
//! and view models only ever see [`ProcedureCall`] in and
//! `Result<Value, TransportFailure>` out. [`HttpTransport`] owns the wire
//! details — URL joining, query-string encoding for reads, JSON bodies for
//! writes, and the mapping of reqwest failures into transport variants.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::body_preview;

const DEFAULT_USER_AGENT: &str = concat!("forum-client/", env!("CARGO_PKG_VERSION"));

/// HTTP verb a procedure maps onto: queries read, mutations write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureMethod {
    /// Read-only query; input travels in the query string.
    Get,
    /// Write mutation; input travels as a JSON body.
    Post,
}

/// A single procedure invocation handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    /// Wire method for this procedure.
    pub method: ProcedureMethod,
    /// Path relative to the API base, e.g. `posts` or `posts/42`.
    pub path: String,
    /// Structured input; `Value::Null` for input-less procedures.
    pub input: Value,
}

/// Failures reported by a transport implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportFailure {
    /// The request did not complete in time.
    #[error("request to {path} timed out")]
    Timeout {
        /// Procedure path that timed out.
        path: String,
    },
    /// The request could not be carried out at all.
    #[error("transport failure calling {path}: {message}")]
    Transport {
        /// Procedure path that failed.
        path: String,
        /// Adapter-level description of the failure.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("procedure {path} returned status {status}")]
    Status {
        /// Procedure path that failed.
        path: String,
        /// HTTP status code observed.
        status: u16,
        /// Raw failure body, to be normalised by the error boundary.
        body: Vec<u8>,
    },
}

/// Client-side transport port for the procedure surface.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one procedure call, returning the decoded JSON response.
    async fn call(&self, request: ProcedureCall) -> Result<Value, TransportFailure>;
}

/// Reqwest-backed transport speaking HTTP+JSON to the backend.
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    /// Build a transport for the given API base URL (e.g.
    /// `https://forum.example/api/v1/`) with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base })
    }

    fn join(&self, path: &str) -> Result<Url, TransportFailure> {
        self.base.join(path).map_err(|error| TransportFailure::Transport {
            path: path.to_owned(),
            message: format!("invalid procedure path: {error}"),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ProcedureCall) -> Result<Value, TransportFailure> {
        let ProcedureCall {
            method,
            path,
            input,
        } = request;
        let mut url = self.join(&path)?;

        let builder = match method {
            ProcedureMethod::Get => {
                if let Some(query) = encode_query(&input) {
                    url.set_query(Some(&query));
                }
                self.client.get(url)
            }
            ProcedureMethod::Post => self.client.post(url).json(&input),
        };

        let response = builder
            .send()
            .await
            .map_err(|error| map_reqwest_error(&path, &error))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_reqwest_error(&path, &error))?;

        if !status.is_success() {
            return Err(TransportFailure::Status {
                path,
                status: status.as_u16(),
                body: body.to_vec(),
            });
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|error| TransportFailure::Transport {
            path,
            message: format!(
                "response is not valid JSON: {error} (body: {})",
                body_preview(&body)
            ),
        })
    }
}

/// Flatten a JSON object of scalars into a query string.
///
/// Null and absent fields are skipped; input DTOs keep optional filters out
/// of the URL with `skip_serializing_if`.
fn encode_query(input: &Value) -> Option<String> {
    let object = input.as_object()?;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in object {
        let encoded = match value {
            Value::Null => continue,
            Value::Bool(flag) => if *flag { "1".to_owned() } else { "0".to_owned() },
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        serializer.append_pair(key, &encoded);
        any = true;
    }
    any.then(|| serializer.finish())
}

fn map_reqwest_error(path: &str, error: &reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout {
            path: path.to_owned(),
        }
    } else {
        TransportFailure::Transport {
            path: path.to_owned(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_encoding_skips_null_fields() {
        let input = json!({ "page": 2, "perPage": 10, "search": null });
        let query = encode_query(&input).expect("non-empty query");
        assert!(query.contains("page=2"));
        assert!(query.contains("perPage=10"));
        assert!(!query.contains("search"));
    }

    #[test]
    fn query_encoding_percent_escapes_text() {
        let input = json!({ "search": "hello world" });
        assert_eq!(encode_query(&input).as_deref(), Some("search=hello+world"));
    }

    #[test]
    fn booleans_encode_as_numeric_flags() {
        let input = json!({ "showPagination": true });
        assert_eq!(
            encode_query(&input).as_deref(),
            Some("showPagination=1")
        );
    }

    #[test]
    fn null_input_yields_no_query() {
        assert_eq!(encode_query(&Value::Null), None);
        assert_eq!(encode_query(&json!({})), None);
    }
}
