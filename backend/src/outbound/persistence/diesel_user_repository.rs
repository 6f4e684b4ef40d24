//! PostgreSQL-backed user adapter with credential verification.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::domain::ports::{PersistenceError, UserRepository};
use crate::domain::{Role, User, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::{roles, users, users_roles};

/// Diesel-backed implementation of the user port.
///
/// Passwords are stored as hex-encoded SHA-256 digests; verification hashes
/// the submitted password and compares digests.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Hex-encoded SHA-256 digest of a password.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

async fn load_roles(
    conn: &mut AsyncPgConnection,
    user_id: i64,
) -> Result<Vec<Role>, PersistenceError> {
    let names: Vec<String> = users_roles::table
        .inner_join(roles::table)
        .filter(users_roles::user_id.eq(user_id))
        .select(roles::name)
        .load(conn)
        .await
        .map_err(|error| map_diesel_error(error, "role list"))?;
    Ok(names
        .into_iter()
        .filter_map(|name| {
            let role = Role::from_name(&name);
            if role.is_none() {
                warn!(%name, user_id, "unknown role name in database");
            }
            role
        })
        .collect())
}

fn row_to_user(row: &UserRow, roles: Vec<Role>) -> User {
    User::new(UserId::new(row.id), row.first_name.clone(), roles)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "user find"))?;
        let Some(row) = row else {
            return Ok(None);
        };
        let held = load_roles(&mut conn, row.id).await?;
        Ok(Some(row_to_user(&row, held)))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, "user lookup"))?;
        let Some(row) = row else {
            return Ok(None);
        };
        if row.password_digest != password_digest(password) {
            return Ok(None);
        }
        let held = load_roles(&mut conn, row.id).await?;
        Ok(Some(row_to_user(&row, held)))
    }
}
