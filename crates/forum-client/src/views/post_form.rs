//! Creation form model: field validation, coercion, and submission flow.

use crate::api::{PostCreateInput, PostDetailDto};
use crate::client::Mutation;
use crate::error::ProcedureError;

/// Upper bound on post titles, matching the server-side rule.
pub const TITLE_MAX: usize = 200;

/// The category select's value, coerced from raw option input.
///
/// An empty or non-numeric option (the "Choose a category" placeholder)
/// becomes [`CategorySelection::NotSelected`] rather than a zero or garbage
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// No category chosen yet.
    #[default]
    NotSelected,
    /// A concrete category identifier.
    Selected(i64),
}

impl CategorySelection {
    /// Coerce a raw option value.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map_or(Self::NotSelected, Self::Selected)
    }
}

/// A field-level validation error, surfaced inline next to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field the error belongs to.
    pub field: &'static str,
    /// Message shown next to the field.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The user's in-progress input. Kept intact across failed submissions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    /// Raw title input.
    pub title: String,
    /// Coerced category selection.
    pub category: CategorySelection,
}

impl PostDraft {
    /// Validate the draft into a procedure input.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once; validation failures never reach
    /// the transport.
    pub fn validate(&self) -> Result<PostCreateInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "title is required"));
        } else if title.chars().count() > TITLE_MAX {
            errors.push(FieldError::new(
                "title",
                format!("title must be at most {TITLE_MAX} characters"),
            ));
        }
        let category_id = match self.category {
            CategorySelection::Selected(id) => Some(id),
            CategorySelection::NotSelected => {
                errors.push(FieldError::new("categoryId", "choose a category"));
                None
            }
        };
        match (errors.is_empty(), category_id) {
            (true, Some(category_id)) => Ok(PostCreateInput {
                title: title.to_owned(),
                category_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; errors go inline and nothing was sent.
    Invalid(Vec<FieldError>),
    /// The post was created.
    Created {
        /// Identifier of the new post.
        post_id: i64,
        /// Confirmation notification text.
        notice: String,
        /// Detail page to navigate to.
        navigate_to: String,
    },
    /// The procedure failed; the draft stays intact and the error is shown
    /// near the submit control.
    Failed(ProcedureError),
}

/// The creation form: a draft plus the submission flow around it.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    /// Current draft values.
    pub draft: PostDraft,
}

impl PostForm {
    /// A form pre-filled with the given values.
    pub fn with_draft(draft: PostDraft) -> Self {
        Self { draft }
    }

    /// Submit the draft through the given mutation.
    ///
    /// Validation runs first and short-circuits without a network call. On
    /// success the caller gets a notice and a navigation target for the new
    /// post; on failure the draft is untouched so the user can retry.
    pub async fn submit(
        &self,
        mutation: &Mutation<PostCreateInput, PostDetailDto>,
    ) -> SubmitOutcome {
        let input = match self.draft.validate() {
            Ok(input) => input,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };
        match mutation.mutate_async(&input).await {
            Ok(post) => SubmitOutcome::Created {
                post_id: post.id,
                notice: "Post added".to_owned(),
                navigate_to: format!("/posts/{}", post.id),
            },
            Err(error) => SubmitOutcome::Failed(error),
        }
    }
}
