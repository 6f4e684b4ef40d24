//! Post listing, creation, and detail handlers.
//!
//! ```text
//! GET  /api/v1/posts?page=2&perPage=50&categoryId=7&search=abc
//! POST /api/v1/posts {"title":"Hello","categoryId":1}
//! GET  /api/v1/posts/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::{Page, PageRequest};
use serde::Deserialize;

use crate::domain::ports::PostListFilter;
use crate::domain::{CategoryId, DomainError, NewPost, Post, PostId, PostSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page, parse_per_page, parse_title};

/// Query parameters accepted by the post listing.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PostListParams {
    /// 1-indexed page number; defaults to 1.
    pub page: Option<u32>,
    /// Records per page; one of 10, 50, or 100. Defaults to 10.
    pub per_page: Option<u32>,
    /// Restrict the listing to one category.
    pub category_id: Option<i64>,
    /// Case-insensitive title substring filter.
    pub search: Option<String>,
}

impl PostListParams {
    fn filter(&self) -> PostListFilter {
        PostListFilter {
            category_id: self.category_id.map(CategoryId::new),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        }
    }
}

/// One page of post summaries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PostListParams),
    responses(
        (status = 200, description = "A page of posts", body = crate::inbound::http::schemas::PostPageSchema),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    params: web::Query<PostListParams>,
) -> ApiResult<web::Json<Page<PostSummary>>> {
    let page = parse_page(params.page)?;
    let per_page = parse_per_page(params.per_page)?;
    let envelope = state
        .posts
        .list(&params.filter(), PageRequest::new(page, per_page))
        .await?;
    Ok(web::Json(envelope))
}

/// Post creation request body.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateRequest {
    /// Post title; trimmed, non-empty, at most 200 characters.
    pub title: String,
    /// Target category.
    pub category_id: i64,
}

/// Create a post in a category.
///
/// Requires a session. Posting into an admin-write-only category
/// additionally requires the administrator role.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = PostCreateRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PostCreateRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let author = state
        .users
        .find_by_id(user_id)
        .await
        .map_err(|error| DomainError::internal(error.to_string()))?
        .ok_or_else(|| DomainError::unauthorized("login required"))?;
    let title = parse_title(&payload.title)?;
    let new_post = NewPost {
        title,
        category_id: CategoryId::new(payload.category_id),
        author_id: author.id,
    };
    let post = state.posts.create(new_post, &author).await?;
    Ok(HttpResponse::Created().json(post))
}

/// One post with its comments. Serving the detail view counts as a view.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["posts"],
    operation_id = "findPost",
    security([])
)]
#[get("/posts/{id}")]
pub async fn find_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Post>> {
    let post = state.posts.find(PostId::new(path.into_inner())).await?;
    Ok(web::Json(post))
}
