//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod error;
pub mod posts;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;
