//! Posts, comments, and the listing projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::category::CategoryId;
use super::user::UserId;

/// Maximum length of a post title.
pub const TITLE_MAX: usize = 200;

/// Validation errors raised when constructing post values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Title is empty once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Title exceeds [`TITLE_MAX`] characters.
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// The enforced maximum.
        max: usize,
    },
}

/// Stable post identifier assigned by the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated post title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct PostTitle(String);

impl PostTitle {
    /// Validate and construct a title; surrounding whitespace is trimmed.
    pub fn new(raw: impl Into<String>) -> Result<Self, PostValidationError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(PostValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed))
    }

    /// Borrow the title as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PostTitle {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostTitle> for String {
    fn from(value: PostTitle) -> Self {
        value.0
    }
}

/// A comment attached to a post's detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Database identifier.
    pub id: i64,
    /// Comment body.
    pub body: String,
    /// Commenter's first name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_first_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A full post as returned by the find and create procedures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Database identifier.
    pub id: PostId,
    /// Post title.
    pub title: PostTitle,
    /// Owning category.
    pub category_id: CategoryId,
    /// Author's first name; absent for deleted or anonymous authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_first_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Times the detail view has been served.
    pub view_count: i64,
    /// Comments in creation order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// The listing projection of a post: one row of the paginated index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Database identifier.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Number of comments on the post.
    pub comment_count: u32,
    /// Author's first name; absent for deleted or anonymous authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_first_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Times the detail view has been served.
    pub view_count: i64,
}

/// Input for creating a post, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Validated title.
    pub title: PostTitle,
    /// Target category.
    pub category_id: CategoryId,
    /// Authenticated author.
    pub author_id: UserId,
}
