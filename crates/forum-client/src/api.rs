//! Typed procedure definitions for the forum backend.
//!
//! One DTO per wire shape, camelCase on the wire, grouped by resource the
//! same way the server groups its endpoints: posts, categories, session.

use chrono::{DateTime, Utc};
use pagination::{ListQuery, Page};
use serde::{Deserialize, Serialize};

use crate::client::{Client, Mutation};
use crate::error::ProcedureError;
use crate::result::QueryCell;

/// Input for `post.list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListInput {
    /// Page to fetch, 1-indexed.
    pub page: u32,
    /// Records per page.
    pub per_page: u32,
    /// Optional category filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Optional case-insensitive title filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl From<&ListQuery> for PostListInput {
    fn from(query: &ListQuery) -> Self {
        Self {
            page: query.page.get(),
            per_page: query.per_page.get(),
            category_id: query.category_id,
            search: query.search.clone(),
        }
    }
}

/// One row of the post listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryDto {
    /// Post identifier.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Owning category.
    pub category_id: i64,
    /// Number of comments on the post.
    pub comment_count: u32,
    /// Author's first name; absent for deleted or anonymous authors.
    #[serde(default)]
    pub author_first_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Times the post detail has been viewed.
    pub view_count: i64,
}

/// A comment on the post detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    /// Comment identifier.
    pub id: i64,
    /// Comment body.
    pub body: String,
    /// Commenter's first name, when known.
    #[serde(default)]
    pub author_first_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Full post payload returned by `post.find` and `post.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailDto {
    /// Post identifier.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Owning category.
    pub category_id: i64,
    /// Author's first name, when known.
    #[serde(default)]
    pub author_first_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Times the post detail has been viewed.
    pub view_count: i64,
    /// Comments in creation order.
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

/// Input for `post.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateInput {
    /// Post title; must be non-blank.
    pub title: String,
    /// Target category.
    pub category_id: i64,
}

/// A post category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Category identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Whether post creation is restricted to administrators.
    pub admin_write_only: bool,
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User identifier.
    pub id: i64,
    /// First name used as the display name, when set.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Role names held by the user.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserDto {
    /// Whether the user holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == "Admin")
    }
}

/// Input for `session.login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// The forum's procedure surface, grouped by resource.
#[derive(Clone)]
pub struct ForumApi {
    client: Client,
}

impl ForumApi {
    /// Wrap a procedure client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying client, for ad hoc calls.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// `post.list`: fetch one page of post summaries into `cell`.
    pub async fn list_posts(&self, input: &PostListInput, cell: &QueryCell<Page<PostSummaryDto>>) {
        self.client.query("posts", input, cell).await;
    }

    /// `post.find`: fetch one post with its comments into `cell`.
    pub async fn find_post(&self, id: i64, cell: &QueryCell<PostDetailDto>) {
        self.client
            .query(&format!("posts/{id}"), &serde_json::Value::Null, cell)
            .await;
    }

    /// `post.create`: a mutation handle for submitting new posts.
    pub fn create_post(&self) -> Mutation<PostCreateInput, PostDetailDto> {
        self.client.mutation("posts")
    }

    /// `category.list`: fetch all categories into `cell`.
    pub async fn list_categories(&self, cell: &QueryCell<Page<CategoryDto>>) {
        self.client
            .query("categories", &serde_json::Value::Null, cell)
            .await;
    }

    /// `category.find`: fetch one category into `cell`.
    pub async fn find_category(&self, id: i64, cell: &QueryCell<CategoryDto>) {
        self.client
            .query(&format!("categories/{id}"), &serde_json::Value::Null, cell)
            .await;
    }

    /// `session.login`: authenticate, establishing the session cookie.
    ///
    /// # Errors
    ///
    /// Rejects with the structured error on bad credentials.
    pub async fn login(&self, input: &LoginInput) -> Result<(), ProcedureError> {
        self.client
            .call::<_, serde_json::Value>(crate::transport::ProcedureMethod::Post, "login", input)
            .await
            .map(|_| ())
    }

    /// `session.me`: fetch the current user into `cell`.
    pub async fn current_user(&self, cell: &QueryCell<UserDto>) {
        self.client
            .query("me", &serde_json::Value::Null, cell)
            .await;
    }
}
