//! Rendering-free view models for the post listing and submission flow.
//!
//! Markup and styling live elsewhere; these models compute everything a
//! renderer needs — row annotations, control enablement, empty/skeleton
//! states, validation errors, navigation targets — from plain inputs, so
//! the whole flow is testable without a UI.

pub mod post_form;
pub mod post_list;

pub use post_form::{CategorySelection, FieldError, PostDraft, PostForm, SubmitOutcome};
pub use post_list::{create_action, CreateAction, PostListView, PostRow};
