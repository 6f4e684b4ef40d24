//! The procedure client: typed calls driving observable result cells.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{FailurePayload, ProcedureError};
use crate::result::QueryCell;
use crate::transport::{HttpTransport, ProcedureCall, ProcedureMethod, Transport, TransportFailure};

/// Typed client over an arbitrary [`Transport`].
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Wrap an existing transport (tests use stubs here).
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Convenience constructor over [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn over_http(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(HttpTransport::new(base, timeout)?)))
    }

    /// Invoke one procedure and decode its typed response.
    ///
    /// # Errors
    ///
    /// Returns the structured [`ProcedureError`] extracted from the failure
    /// payload, or a client-side `internal_error` when encoding or decoding
    /// fails.
    pub async fn call<I, O>(
        &self,
        method: ProcedureMethod,
        path: &str,
        input: &I,
    ) -> Result<O, ProcedureError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let input = serde_json::to_value(input).map_err(|error| {
            ProcedureError::internal(format!("failed to encode procedure input: {error}"))
                .with_path(path)
        })?;
        let value = self
            .transport
            .call(ProcedureCall {
                method,
                path: path.to_owned(),
                input,
            })
            .await
            .map_err(|failure| extract_error(failure, path))?;
        serde_json::from_value(value).map_err(|error| {
            ProcedureError::internal(format!("malformed response payload: {error}")).with_path(path)
        })
    }

    /// Run a read query, driving `cell` through `Loading` to a terminal
    /// phase. Superseded invocations resolve into the void.
    pub async fn query<I, O>(&self, path: &str, input: &I, cell: &QueryCell<O>)
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let generation = cell.begin();
        let outcome = self.call(ProcedureMethod::Get, path, input).await;
        cell.resolve(generation, outcome);
    }

    /// Create a mutation handle for a write procedure.
    pub fn mutation<I, O>(&self, path: impl Into<String>) -> Mutation<I, O> {
        Mutation {
            client: self.clone(),
            path: path.into(),
            cell: QueryCell::new(),
            _marker: PhantomData,
        }
    }
}

/// Normalise a transport failure into a structured error.
///
/// Status failures go through the tagged payload classification; transport
/// and timeout failures become client-side internal errors carrying the
/// procedure path.
pub(crate) fn extract_error(failure: TransportFailure, path: &str) -> ProcedureError {
    match failure {
        TransportFailure::Status { status, body, .. } => FailurePayload::classify(&body)
            .into_error()
            .with_path(path)
            .with_status(status),
        other @ (TransportFailure::Timeout { .. } | TransportFailure::Transport { .. }) => {
            ProcedureError::internal(other.to_string()).with_path(path)
        }
    }
}

/// Handle for a write procedure, mirroring the query state machine.
///
/// Invocation is explicit rather than automatic, and comes in two forms:
/// [`Mutation::mutate`] fires and forgets (the outcome is only observable
/// through the cell) and [`Mutation::mutate_async`] awaits the outcome so
/// callers can sequence follow-up actions such as navigation.
pub struct Mutation<I, O> {
    client: Client,
    path: String,
    cell: QueryCell<O>,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            cell: self.cell.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I, O> Mutation<I, O>
where
    I: Serialize + Send + Sync + 'static,
    O: DeserializeOwned + Clone + Send + 'static,
{
    /// The observable state cell for this mutation.
    pub fn cell(&self) -> &QueryCell<O> {
        &self.cell
    }

    /// Awaitable form: resolves the cell and returns the outcome.
    ///
    /// # Errors
    ///
    /// Rejects with the structured [`ProcedureError`] on failure; the same
    /// error is recorded in the cell.
    pub async fn mutate_async(&self, input: &I) -> Result<O, ProcedureError> {
        let generation = self.cell.begin();
        let outcome = self
            .client
            .call::<I, O>(ProcedureMethod::Post, &self.path, input)
            .await;
        self.cell.resolve(generation, outcome.clone());
        outcome
    }

    /// Fire-and-forget form: spawns the invocation and returns immediately.
    pub fn mutate(&self, input: I) {
        let this = self.clone();
        tokio::spawn(async move {
            // The outcome is recorded in the cell; callers opting into the
            // fire-and-forget form observe it there.
            let _outcome = this.mutate_async(&input).await;
        });
    }
}
