//! View model for the filterable, paginated post listing.

use pagination::{previous_enabled, ListQuery, Page};

use crate::api::{CategoryDto, PostSummaryDto, UserDto};
use crate::result::QueryResult;

/// Display label used when a post has no resolvable author.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// One fully annotated listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    /// Post identifier.
    pub id: i64,
    /// Title cell text, with the comment count suffix when there are any.
    pub title: String,
    /// Author display name, falling back to [`ANONYMOUS_AUTHOR`].
    pub author: String,
    /// Creation date formatted `MM-dd-yyyy`.
    pub date: String,
    /// View counter.
    pub view_count: i64,
    /// Path of the post's detail page.
    pub detail_path: String,
}

/// The listing view: current URL state plus the listing query's result.
#[derive(Debug, Clone, Copy)]
pub struct PostListView<'a> {
    params: &'a ListQuery,
    result: &'a QueryResult<Page<PostSummaryDto>>,
}

impl<'a> PostListView<'a> {
    /// Bind the view to its inputs.
    pub fn new(params: &'a ListQuery, result: &'a QueryResult<Page<PostSummaryDto>>) -> Self {
        Self { params, result }
    }

    /// Skeleton placeholder is shown while the listing query is in flight.
    pub fn shows_skeleton(&self) -> bool {
        self.result.is_loading()
    }

    /// "No records" indicator: the result set is empty and nothing is
    /// loading.
    pub fn shows_empty_state(&self) -> bool {
        !self.result.is_loading() && self.result.data().is_some_and(Page::is_empty)
    }

    /// "Previous" is active only past page 1 and once data has arrived.
    pub fn previous_enabled(&self) -> bool {
        self.result.data().is_some() && previous_enabled(self.params.page)
    }

    /// "Next" is active before the last page, with data, and only when the
    /// current page actually has records.
    pub fn next_enabled(&self) -> bool {
        self.result
            .data()
            .is_some_and(|page| page.next_enabled(self.params.page))
    }

    /// Annotated rows for the current page.
    pub fn rows(&self) -> Vec<PostRow> {
        self.result
            .data()
            .map(|page| page.records.iter().map(|post| self.row(post)).collect())
            .unwrap_or_default()
    }

    /// Footer caption, e.g. `11 ~ 17 (42 total)`; absent until data arrives
    /// or when the page is empty.
    pub fn range_caption(&self) -> Option<String> {
        let page = self.result.data()?;
        let (first, last) = page.record_range(self.params.page, self.params.per_page)?;
        Some(format!("{first} ~ {last} ({} total)", page.total))
    }

    fn row(&self, post: &PostSummaryDto) -> PostRow {
        let title = if post.comment_count > 0 {
            format!("{} ({})", post.title, post.comment_count)
        } else {
            post.title.clone()
        };
        let author = post
            .author_first_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_owned());
        let category_suffix = self
            .params
            .category_id
            .map(|id| format!("?categoryId={id}"))
            .unwrap_or_default();
        PostRow {
            id: post.id,
            title,
            author,
            date: post.created_at.format("%m-%d-%Y").to_string(),
            view_count: post.view_count,
            detail_path: format!(
                "/posts/{}/{}{category_suffix}",
                post.id,
                kebab_case(&post.title)
            ),
        }
    }
}

/// What the listing header offers for post creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateAction {
    /// No create affordance at all.
    Hidden,
    /// A visible create link that routes to the login flow.
    RedirectToLogin,
    /// The creation form for the given category.
    NewPost {
        /// Category the new post will be filed under.
        category_id: i64,
    },
}

/// Decide the create affordance for the listing header.
///
/// The action only exists on the full listing (pagination shown). It is
/// hidden for admin-write-only categories unless the current user holds the
/// Admin role; a visitor who can see the action but is not signed in is
/// routed to login instead of the form. A category still being fetched is
/// treated as unrestricted, matching the shipped behaviour.
pub fn create_action(
    show_pagination: bool,
    category: Option<&CategoryDto>,
    current_user: Option<&UserDto>,
) -> CreateAction {
    if !show_pagination {
        return CreateAction::Hidden;
    }
    let restricted = category.is_some_and(|c| c.admin_write_only);
    if restricted && !current_user.is_some_and(UserDto::is_admin) {
        return CreateAction::Hidden;
    }
    match current_user {
        Some(_) => CreateAction::NewPost {
            category_id: category.map_or(0, |c| c.id),
        },
        None => CreateAction::RedirectToLogin,
    }
}

/// Lower-case, hyphen-separated slug of a title for detail URLs.
fn kebab_case(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lowered in ch.to_lowercase() {
                slug.push(lowered);
            }
        } else {
            pending_separator = true;
        }
    }
    slug
}
