//! Authentication and current-user handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! GET  /api/v1/me
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_text;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let username = require_text("username", &payload.username)?;
    let password = require_text("password", &payload.password)?;
    let user = state
        .users
        .authenticate(&username, &password)
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?
        .ok_or_else(|| DomainError::unauthorized("invalid credentials"))?;
    session.persist_user(user.id)?;
    Ok(web::Json(user))
}

/// The authenticated user behind the current session.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state
        .users
        .find_by_id(user_id)
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?
        // A session can outlive its account; treat it as unauthenticated.
        .ok_or_else(|| DomainError::unauthorized("login required"))?;
    Ok(web::Json(user))
}
