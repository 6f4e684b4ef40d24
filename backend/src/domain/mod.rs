//! Domain primitives and aggregates.
//!
//! Strongly typed entities shared by the HTTP and persistence layers, the
//! ports those layers plug into, and the post service that owns listing and
//! creation policy. Types are transport agnostic; serde attributes document
//! the wire contract where a type crosses it.

pub mod category;
pub mod error;
pub mod ports;
pub mod post;
pub mod posts;
pub mod user;

pub use category::{Category, CategoryId, CategoryName, CategoryValidationError};
pub use error::{DomainError, ErrorCode};
pub use post::{Comment, NewPost, Post, PostId, PostSummary, PostTitle, PostValidationError};
pub use posts::PostService;
pub use user::{Role, User, UserId};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, DomainError>;
