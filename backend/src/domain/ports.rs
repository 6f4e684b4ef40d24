//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants. The `Fixture*` implementations back handler
//! and service tests with an in-memory store that honours the same listing
//! semantics as the Diesel adapters.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use thiserror::Error;

use super::category::{Category, CategoryId, CategoryName};
use super::post::{Comment, NewPost, Post, PostId, PostSummary};
use super::user::{Role, User, UserId};

/// Errors surfaced by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Database connectivity or checkout failures.
    #[error("persistence connection failed: {message}")]
    Connection {
        /// Adapter-level description of the failure.
        message: String,
    },
    /// Query execution failures.
    #[error("persistence query failed: {message}")]
    Query {
        /// Adapter-level description of the failure.
        message: String,
    },
}

impl PersistenceError {
    /// Helper for connection-related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Filters applied to the post listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostListFilter {
    /// Restrict to one category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive title substring filter.
    pub search: Option<String>,
}

/// Access to stored posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// One page of post summaries, newest first.
    async fn list(
        &self,
        filter: &PostListFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, PersistenceError>;

    /// Persist a new post and return it fully populated.
    async fn create(&self, new_post: &NewPost) -> Result<Post, PersistenceError>;

    /// Fetch a post with its comments, incrementing the view counter.
    async fn find_and_touch(&self, id: PostId) -> Result<Option<Post>, PersistenceError>;
}

/// Access to stored categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories in display order.
    async fn list(&self) -> Result<Vec<Category>, PersistenceError>;

    /// One category by identifier.
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, PersistenceError>;
}

/// Access to stored users and credentials.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError>;

    /// Verify credentials, returning the user on success.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, PersistenceError>;
}

/// In-memory post store with the same listing semantics as the Diesel
/// adapter: newest first, category and case-insensitive title filters,
/// author names resolved against the fixture accounts.
pub struct FixturePostRepository {
    state: Mutex<Vec<Post>>,
    authors: Vec<(UserId, String)>,
}

impl Default for FixturePostRepository {
    fn default() -> Self {
        Self::seeded(Vec::new())
    }
}

impl FixturePostRepository {
    /// A store seeded with the given posts (listing order is derived from
    /// ids, newest first). Author names on create resolve against the same
    /// accounts as [`FixtureUserRepository`].
    pub fn seeded(posts: Vec<Post>) -> Self {
        Self {
            state: Mutex::new(posts),
            authors: vec![
                (UserId::new(1), "Alice".to_owned()),
                (UserId::new(2), "Bob".to_owned()),
            ],
        }
    }

    fn author_first_name(&self, id: UserId) -> Option<String> {
        self.authors
            .iter()
            .find(|(author_id, _)| *author_id == id)
            .map(|(_, name)| name.clone())
    }

    fn next_id(posts: &[Post]) -> i64 {
        posts.iter().map(|post| post.id.get()).max().unwrap_or(0) + 1
    }
}

fn matches_filter(post: &Post, filter: &PostListFilter) -> bool {
    if let Some(category_id) = filter.category_id {
        if post.category_id != category_id {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let haystack = post.title.as_str().to_lowercase();
        if !haystack.contains(&search.to_lowercase()) {
            return false;
        }
    }
    true
}

fn summarise(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.as_str().to_owned(),
        category_id: post.category_id,
        comment_count: u32::try_from(post.comments.len()).unwrap_or(u32::MAX),
        author_first_name: post.author_first_name.clone(),
        created_at: post.created_at,
        view_count: post.view_count,
    }
}

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn list(
        &self,
        filter: &PostListFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, PersistenceError> {
        let state = self.state.lock().map_err(|_| lock_error())?;
        let mut matching: Vec<&Post> = state
            .iter()
            .filter(|post| matches_filter(post, filter))
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let records = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(summarise)
            .collect();
        Ok(Page::new(records, total, page.per_page))
    }

    async fn create(&self, new_post: &NewPost) -> Result<Post, PersistenceError> {
        let mut state = self.state.lock().map_err(|_| lock_error())?;
        let id = PostId::new(Self::next_id(&state));
        let post = Post {
            id,
            title: new_post.title.clone(),
            category_id: new_post.category_id,
            author_first_name: self.author_first_name(new_post.author_id),
            created_at: Utc::now(),
            view_count: 0,
            comments: Vec::new(),
        };
        state.push(post.clone());
        Ok(post)
    }

    async fn find_and_touch(&self, id: PostId) -> Result<Option<Post>, PersistenceError> {
        let mut state = self.state.lock().map_err(|_| lock_error())?;
        let Some(post) = state.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        post.view_count += 1;
        Ok(Some(post.clone()))
    }
}

fn lock_error() -> PersistenceError {
    PersistenceError::query("fixture store lock poisoned")
}

/// In-memory category store.
pub struct FixtureCategoryRepository {
    categories: Vec<Category>,
}

impl FixtureCategoryRepository {
    /// A store holding exactly the given categories.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

impl Default for FixtureCategoryRepository {
    /// Two categories: an open one and an admin-write-only one.
    fn default() -> Self {
        let open = Category {
            id: CategoryId::new(1),
            name: CategoryName::new("general").expect("fixture name validates"),
            admin_write_only: false,
        };
        let restricted = Category {
            id: CategoryId::new(2),
            name: CategoryName::new("notices").expect("fixture name validates"),
            admin_write_only: true,
        };
        Self::new(vec![open, restricted])
    }
}

#[async_trait]
impl CategoryRepository for FixtureCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, PersistenceError> {
        Ok(self.categories.clone())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, PersistenceError> {
        Ok(self
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }
}

/// In-memory user store with plain credential pairs.
pub struct FixtureUserRepository {
    users: Vec<(User, &'static str, &'static str)>,
}

impl Default for FixtureUserRepository {
    /// Two accounts: `admin`/`password` holding the Admin role and
    /// `bob`/`password` holding Member.
    fn default() -> Self {
        let admin = User::new(UserId::new(1), Some("Alice".into()), vec![Role::Admin]);
        let member = User::new(UserId::new(2), Some("Bob".into()), vec![Role::Member]);
        Self {
            users: vec![(admin, "admin", "password"), (member, "bob", "password")],
        }
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError> {
        Ok(self
            .users
            .iter()
            .find(|(user, _, _)| user.id == id)
            .map(|(user, _, _)| user.clone()))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, PersistenceError> {
        Ok(self
            .users
            .iter()
            .find(|(_, name, pass)| *name == username && *pass == password)
            .map(|(user, _, _)| user.clone()))
    }
}

/// A comment fixture for detail-view tests.
pub fn fixture_comment(id: i64, body: &str, created_at: DateTime<Utc>) -> Comment {
    Comment {
        id,
        body: body.to_owned(),
        author_first_name: None,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::PostTitle;
    use pagination::{PageNumber, PageSize};

    fn post(id: i64, title: &str, category: i64) -> Post {
        Post {
            id: PostId::new(id),
            title: PostTitle::new(title).expect("valid title"),
            category_id: CategoryId::new(category),
            author_first_name: None,
            created_at: "2024-05-04T12:30:00Z".parse().expect("valid timestamp"),
            view_count: 0,
            comments: Vec::new(),
        }
    }

    fn request(page: u32, per_page: PageSize) -> PageRequest {
        PageRequest::new(PageNumber::new(page).expect("valid page"), per_page)
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_paginated() {
        let repository =
            FixturePostRepository::seeded((1..=15).map(|id| post(id, "topic", 1)).collect());
        let page = repository
            .list(&PostListFilter::default(), request(1, PageSize::Ten))
            .await
            .expect("list posts");
        assert_eq!(page.total, 15);
        assert_eq!(page.last_page, 2);
        assert_eq!(page.records.first().map(|r| r.id.get()), Some(15));
        assert_eq!(page.records.len(), 10);
    }

    #[tokio::test]
    async fn search_filters_case_insensitively() {
        let repository = FixturePostRepository::seeded(vec![
            post(1, "Rust tips", 1),
            post(2, "Cooking", 1),
            post(3, "More RUST", 2),
        ]);
        let filter = PostListFilter {
            category_id: None,
            search: Some("rust".into()),
        };
        let page = repository
            .list(&filter, request(1, PageSize::Ten))
            .await
            .expect("list posts");
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn category_filter_narrows_the_listing() {
        let repository = FixturePostRepository::seeded(vec![
            post(1, "a", 1),
            post(2, "b", 2),
            post(3, "c", 2),
        ]);
        let filter = PostListFilter {
            category_id: Some(CategoryId::new(2)),
            search: None,
        };
        let page = repository
            .list(&filter, request(1, PageSize::Ten))
            .await
            .expect("list posts");
        assert_eq!(page.total, 2);
        assert!(page.records.iter().all(|r| r.category_id.get() == 2));
    }

    #[tokio::test]
    async fn created_posts_carry_the_author_name() {
        let repository = FixturePostRepository::default();
        let new_post = NewPost {
            title: PostTitle::new("Hello").expect("valid title"),
            category_id: CategoryId::new(1),
            author_id: UserId::new(2),
        };
        let created = repository.create(&new_post).await.expect("create post");
        assert_eq!(created.author_first_name.as_deref(), Some("Bob"));

        let page = repository
            .list(&PostListFilter::default(), request(1, PageSize::Ten))
            .await
            .expect("list posts");
        assert_eq!(
            page.records
                .first()
                .and_then(|r| r.author_first_name.as_deref()),
            Some("Bob")
        );
    }

    #[tokio::test]
    async fn detail_views_serve_comments_in_creation_order() {
        let mut threaded = post(1, "threaded", 1);
        threaded.comments = vec![
            fixture_comment(
                1,
                "first reply",
                "2024-05-04T12:31:00Z".parse().expect("valid timestamp"),
            ),
            fixture_comment(
                2,
                "second reply",
                "2024-05-04T12:45:00Z".parse().expect("valid timestamp"),
            ),
        ];
        let repository = FixturePostRepository::seeded(vec![threaded, post(2, "quiet", 1)]);

        let detail = repository
            .find_and_touch(PostId::new(1))
            .await
            .expect("find post")
            .expect("post exists");
        let ids: Vec<i64> = detail.comments.iter().map(|comment| comment.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let page = repository
            .list(&PostListFilter::default(), request(1, PageSize::Ten))
            .await
            .expect("list posts");
        let counts: Vec<u32> = page.records.iter().map(|r| r.comment_count).collect();
        assert_eq!(counts, vec![0, 2]);
    }

    #[tokio::test]
    async fn find_and_touch_increments_the_view_counter() {
        let repository = FixturePostRepository::seeded(vec![post(1, "a", 1)]);
        let id = PostId::new(1);
        let first = repository
            .find_and_touch(id)
            .await
            .expect("find post")
            .expect("post exists");
        let second = repository
            .find_and_touch(id)
            .await
            .expect("find post")
            .expect("post exists");
        assert_eq!(first.view_count, 1);
        assert_eq!(second.view_count, 2);
        assert!(
            repository
                .find_and_touch(PostId::new(99))
                .await
                .expect("query ok")
                .is_none()
        );
    }

    #[tokio::test]
    async fn fixture_credentials_authenticate() {
        let repository = FixtureUserRepository::default();
        let user = repository
            .authenticate("admin", "password")
            .await
            .expect("query ok")
            .expect("admin exists");
        assert!(user.is_admin());
        assert!(
            repository
                .authenticate("admin", "wrong")
                .await
                .expect("query ok")
                .is_none()
        );
    }
}
