//! PostgreSQL-backed post adapter.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{PersistenceError, PostListFilter, PostRepository};
use crate::domain::{Comment, NewPost, Post, PostId, PostSummary, PostTitle};

use super::diesel_helpers::{escape_like, map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::{post_comments, posts, users};

/// Diesel-backed implementation of the post port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn invalid_row(post_id: i64, error: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::query(format!("stored post {post_id} is invalid: {error}"))
}

fn row_to_summary(
    row: PostRow,
    author_first_name: Option<String>,
    comment_count: u32,
) -> PostSummary {
    PostSummary {
        id: PostId::new(row.id),
        title: row.title,
        category_id: crate::domain::CategoryId::new(row.category_id),
        comment_count,
        author_first_name,
        created_at: row.created_at,
        view_count: row.view_count,
    }
}

fn row_to_post(
    row: PostRow,
    author_first_name: Option<String>,
    comments: Vec<Comment>,
) -> Result<Post, PersistenceError> {
    let title = PostTitle::new(&row.title).map_err(|error| invalid_row(row.id, error))?;
    Ok(Post {
        id: PostId::new(row.id),
        title,
        category_id: crate::domain::CategoryId::new(row.category_id),
        author_first_name,
        created_at: row.created_at,
        view_count: row.view_count,
        comments,
    })
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(
        &self,
        filter: &PostListFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = posts::table
            .left_join(users::table)
            .select((PostRow::as_select(), users::first_name.nullable()))
            .into_boxed();
        let mut count_query = posts::table.into_boxed();

        if let Some(category_id) = filter.category_id {
            query = query.filter(posts::category_id.eq(category_id.get()));
            count_query = count_query.filter(posts::category_id.eq(category_id.get()));
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search));
            query = query.filter(posts::title.ilike(pattern.clone()));
            count_query = count_query.filter(posts::title.ilike(pattern));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "post count"))?;

        let rows: Vec<(PostRow, Option<String>)> = query
            .order(posts::created_at.desc())
            .then_order_by(posts::id.desc())
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "post list"))?;

        let ids: Vec<i64> = rows.iter().map(|(row, _)| row.id).collect();
        let counts: Vec<(i64, i64)> = post_comments::table
            .filter(post_comments::post_id.eq_any(&ids))
            .group_by(post_comments::post_id)
            .select((post_comments::post_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "comment count"))?;

        let records = rows
            .into_iter()
            .map(|(row, author)| {
                let comment_count = counts
                    .iter()
                    .find(|(post_id, _)| *post_id == row.id)
                    .map(|(_, count)| u32::try_from(*count).unwrap_or(u32::MAX))
                    .unwrap_or(0);
                row_to_summary(row, author, comment_count)
            })
            .collect();

        Ok(Page::new(
            records,
            u64::try_from(total).unwrap_or(0),
            page.per_page,
        ))
    }

    async fn create(&self, new_post: &NewPost) -> Result<Post, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPostRow {
            title: new_post.title.as_str().to_owned(),
            category_id: new_post.category_id.get(),
            user_id: Some(new_post.author_id.get()),
        };
        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "post insert"))?;

        let author_first_name = match row.user_id {
            Some(user_id) => users::table
                .find(user_id)
                .select(users::first_name)
                .first::<Option<String>>(&mut conn)
                .await
                .optional()
                .map_err(|error| map_diesel_error(error, "author lookup"))?
                .flatten(),
            None => None,
        };

        row_to_post(row, author_first_name, Vec::new())
    }

    async fn find_and_touch(&self, id: PostId) -> Result<Option<Post>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated: Option<PostRow> = diesel::update(posts::table.find(id.get()))
            .set(posts::view_count.eq(posts::view_count + 1))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "post touch"))?;
        let Some(row) = updated else {
            return Ok(None);
        };

        let author_first_name = match row.user_id {
            Some(user_id) => users::table
                .find(user_id)
                .select(users::first_name)
                .first::<Option<String>>(&mut conn)
                .await
                .optional()
                .map_err(|error| map_diesel_error(error, "author lookup"))?
                .flatten(),
            None => None,
        };

        let comment_rows: Vec<(CommentRow, Option<String>)> = post_comments::table
            .left_join(users::table)
            .filter(post_comments::post_id.eq(row.id))
            .order(post_comments::created_at.asc())
            .select((CommentRow::as_select(), users::first_name.nullable()))
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, "comment list"))?;
        let comments = comment_rows
            .into_iter()
            .map(|(comment, commenter)| Comment {
                id: comment.id,
                body: comment.body,
                author_first_name: commenter,
                created_at: comment.created_at,
            })
            .collect();

        row_to_post(row, author_first_name, comments).map(Some)
    }
}
