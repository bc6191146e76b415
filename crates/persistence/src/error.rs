//! Conversion of database errors into domain errors.

use domain::DomainError;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a database error to `DomainError::Storage`, logging the cause.
pub fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(operation, error = %e, "Database operation failed");
        DomainError::Storage(format!("{}: {}", operation, e))
    }
}

/// Whether the error is a unique violation of the named constraint.
pub fn is_unique_violation(error: &sqlx::Error, constraint: &str) -> bool {
    match error {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
