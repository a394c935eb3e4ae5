//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use sea_orm::{DbErr, RuntimeErr};

use super::Resource;

#[derive(Debug)]
pub enum DomainError {
    /// No row matches the identifier
    NotFound(Resource),
    /// Missing or malformed input, raised before storage is touched
    Validation(String),
    /// Statement rejected by the store (constraint, foreign key, type)
    Storage(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound(resource) => write!(f, "{}", resource.not_found_message()),
            DomainError::Validation(msg) => write!(f, "{}", msg),
            DomainError::Storage(msg) => write!(f, "{}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Statement failures keep the store's own message; pool and connection
// failures are internal.
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match &e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DomainError::Internal(e.to_string()),
            DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))
            | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db_err))) => {
                DomainError::Storage(db_err.message().to_string())
            }
            _ => DomainError::Storage(e.to_string()),
        }
    }
}
