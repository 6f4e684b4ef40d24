//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], which generates the OpenAPI specification for the
//! REST API: all HTTP paths from the inbound layer, the shared error and
//! entity schemas, and the session cookie security scheme. The generated
//! document drives Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Category, Comment, DomainError, ErrorCode, Post, PostSummary, User};
use crate::inbound::http::posts::PostCreateRequest;
use crate::inbound::http::schemas::{CategoryPageSchema, PostPageSchema};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the forum REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Forum backend API",
        description = "HTTP interface for the paginated post listing, post creation, and session authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::find_post,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::find_category,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        User,
        Category,
        Post,
        PostSummary,
        Comment,
        LoginRequest,
        PostCreateRequest,
        PostPageSchema,
        CategoryPageSchema,
    )),
    tags(
        (name = "posts", description = "Post listing, creation, and detail views"),
        (name = "categories", description = "Category reads"),
        (name = "users", description = "Authentication and the current user")
    )
)]
pub struct ApiDoc;
