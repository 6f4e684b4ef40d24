//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::PostService;
use crate::domain::ports::{CategoryRepository, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Post listing and creation policy.
    pub posts: PostService,
    /// Category reads.
    pub categories: Arc<dyn CategoryRepository>,
    /// User lookup and credential checks.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state from its constituent ports.
    pub fn new(
        posts: PostService,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            categories,
            users,
        }
    }
}
