//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; no business logic lives here. Row structs (`models`) and table
//! definitions (`schema`) are internal implementation details, never exposed
//! to the domain layer.

pub(crate) mod diesel_helpers;
mod diesel_category_repository;
mod diesel_post_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::{DieselUserRepository, password_digest};
pub use pool::{DbPool, PoolConfig, PoolError};
