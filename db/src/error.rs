//! Domain error taxonomy for the attendance engine.
//!
//! Every failure of a domain operation is one of four deterministic outcomes
//! of the stored state, plus a catch-all for storage failures. Nothing here
//! is retryable by the engine itself.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or empty required input; correctable by the caller.
    #[error("{0}")]
    Validation(String),

    /// An invariant would be violated: a session is already open, or a
    /// duplicate check-in exists.
    #[error("{0}")]
    Conflict(String),

    /// A referenced session, student, or record does not exist or is not in
    /// the expected state.
    #[error("{0}")]
    NotFound(String),

    /// The guarded-checkout rule failed. Always surfaced, never bypassed.
    #[error("{0}")]
    Authorization(String),

    /// Storage-level failure, distinct from the four domain outcomes.
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// True when the underlying database error is a unique-constraint violation,
/// i.e. a concurrent writer got there first.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
