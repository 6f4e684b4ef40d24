//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. `diesel print-schema` can regenerate them from a live
//! database.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Hex-encoded SHA-256 digest of the password.
        password_digest -> Varchar,
        /// First name shown beside posts; nullable for accounts that never
        /// set one.
        first_name -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role catalogue (`Admin`, `Member`).
    roles (id) {
        /// Primary key.
        id -> Int8,
        /// Unique role name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Join table assigning roles to users.
    users_roles (user_id, role_id) {
        /// User holding the role.
        user_id -> Int8,
        /// Role held.
        role_id -> Int8,
    }
}

diesel::table! {
    /// Post categories.
    categories (id) {
        /// Primary key.
        id -> Int8,
        /// Unique display name.
        name -> Varchar,
        /// Whether post creation is restricted to administrators.
        admin_write_only -> Bool,
    }
}

diesel::table! {
    /// Forum posts.
    posts (id) {
        /// Primary key.
        id -> Int8,
        /// Post title.
        title -> Varchar,
        /// Owning category.
        category_id -> Int8,
        /// Author; null once the account is deleted.
        user_id -> Nullable<Int8>,
        /// Times the detail view has been served.
        view_count -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments attached to posts.
    post_comments (id) {
        /// Primary key.
        id -> Int8,
        /// Commented post.
        post_id -> Int8,
        /// Commenter; null once the account is deleted.
        user_id -> Nullable<Int8>,
        /// Comment body.
        body -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> categories (category_id));
diesel::joinable!(posts -> users (user_id));
diesel::joinable!(post_comments -> posts (post_id));
diesel::joinable!(post_comments -> users (user_id));
diesel::joinable!(users_roles -> users (user_id));
diesel::joinable!(users_roles -> roles (role_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    roles,
    users_roles,
    categories,
    posts,
    post_comments,
);
