//! Diesel row structs for the persistence layer.
//!
//! Internal implementation details of the adapters; never exposed to the
//! domain layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{categories, post_comments, posts, users};

/// One row of the `posts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub category_id: i64,
    pub user_id: Option<i64>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable row for a new post.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow {
    pub title: String,
    pub category_id: i64,
    pub user_id: Option<i64>,
}

/// One row of the `post_comments` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Option<i64>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the `categories` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub admin_write_only: bool,
}

/// One row of the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_digest: String,
    pub first_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
