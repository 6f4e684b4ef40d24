//! Post listing and creation policy.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{info, instrument};

use super::error::DomainError;
use super::ports::{CategoryRepository, PersistenceError, PostListFilter, PostRepository};
use super::post::{NewPost, Post, PostId, PostSummary};
use super::user::User;
use super::ApiResult;

/// Application service owning post reads and the category write gate.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl PostService {
    /// Wire the service to its repositories.
    pub fn new(posts: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { posts, categories }
    }

    /// One page of post summaries matching `filter`.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &PostListFilter,
        page: PageRequest,
    ) -> ApiResult<Page<PostSummary>> {
        self.posts
            .list(filter, page)
            .await
            .map_err(persistence_error)
    }

    /// Create a post on behalf of `author`.
    ///
    /// The target category must exist, and posting into an
    /// admin-write-only category requires the administrator role.
    #[instrument(skip(self, author), fields(author_id = %author.id))]
    pub async fn create(&self, new_post: NewPost, author: &User) -> ApiResult<Post> {
        let category = self
            .categories
            .find_by_id(new_post.category_id)
            .await
            .map_err(persistence_error)?
            .ok_or_else(|| {
                DomainError::invalid_request("unknown category").with_details(json!({
                    "field": "categoryId",
                    "code": "unknown_category",
                }))
            })?;

        if category.admin_write_only && !author.is_admin() {
            return Err(DomainError::forbidden(
                "posting into this category requires the administrator role",
            ));
        }

        let post = self
            .posts
            .create(&new_post)
            .await
            .map_err(persistence_error)?;
        info!(post_id = %post.id, category_id = %post.category_id, "post created");
        Ok(post)
    }

    /// One post with its comments, counting the view.
    #[instrument(skip(self))]
    pub async fn find(&self, id: PostId) -> ApiResult<Post> {
        self.posts
            .find_and_touch(id)
            .await
            .map_err(persistence_error)?
            .ok_or_else(|| DomainError::not_found("no such post"))
    }
}

fn persistence_error(error: PersistenceError) -> DomainError {
    tracing::error!(%error, "persistence failure");
    DomainError::internal(error.to_string())
}
