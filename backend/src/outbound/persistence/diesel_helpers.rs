//! Shared helpers for Diesel repository implementations.

use tracing::debug;

use crate::domain::ports::PersistenceError;

use super::pool::PoolError;

/// Map pool errors to the domain's connection error variant.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to the domain's query error variant, emitting debug
/// context for diagnosis.
pub(crate) fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
            if matches!(kind, DatabaseErrorKind::ClosedConnection) {
                return PersistenceError::connection("database connection error");
            }
        }
        other => debug!(error = %other, %operation, "diesel operation failed"),
    }
    PersistenceError::query(format!("{operation} failed"))
}

/// Escape `LIKE` wildcards so user-supplied search text matches literally.
/// PostgreSQL's default escape character is the backslash.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("50%", "50\\%")]
    #[case("under_score", "under\\_score")]
    #[case("back\\slash", "back\\\\slash")]
    fn like_wildcards_are_escaped(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_like(raw), expected);
    }

    #[test]
    fn pool_errors_map_to_connection_failures() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, PersistenceError::connection("timed out"));
    }

    #[test]
    fn diesel_errors_map_to_query_failures() {
        let error = map_diesel_error(diesel::result::Error::NotFound, "post list");
        assert_eq!(error, PersistenceError::query("post list failed"));
    }
}
