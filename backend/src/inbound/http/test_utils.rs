//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::PostService;
use crate::domain::ports::{
    FixtureCategoryRepository, FixturePostRepository, FixtureUserRepository,
};
use crate::domain::post::Post;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state wired to empty in-memory fixtures.
pub fn fixture_state() -> HttpState {
    fixture_state_seeded(Vec::new())
}

/// HTTP state whose post store starts with the given posts.
pub fn fixture_state_seeded(posts: Vec<Post>) -> HttpState {
    let categories = Arc::new(FixtureCategoryRepository::default());
    let service = PostService::new(
        Arc::new(FixturePostRepository::seeded(posts)),
        categories.clone(),
    );
    HttpState::new(service, categories, Arc::new(FixtureUserRepository::default()))
}
