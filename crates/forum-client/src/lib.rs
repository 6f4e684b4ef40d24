//! Typed client for the forum backend's procedure surface.
//!
//! The crate is split along the same seam as the server: a transport port
//! ([`transport::Transport`]) with a reqwest adapter, a structured error
//! boundary that normalises whatever the transport hands back
//! ([`error::ProcedureError`]), and an observable result state machine
//! ([`result::QueryCell`]) that views read from. On top of that sit the
//! typed procedure definitions ([`api::ForumApi`]) and the rendering-free
//! view models for the post listing and creation form ([`views`]).

pub mod api;
pub mod client;
pub mod error;
pub mod result;
pub mod transport;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::ForumApi;
pub use client::{Client, Mutation};
pub use error::{ErrorCode, FailurePayload, ProcedureError};
pub use result::{Phase, QueryCell, QueryResult};
pub use transport::{HttpTransport, ProcedureCall, ProcedureMethod, Transport, TransportFailure};
