//! Database error types for pulse-db.

use thiserror::Error;

/// Errors from store and service operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The addressed entity does not exist (or belongs to another business).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness rule was violated (email, slug).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The operation is not allowed in the entity's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Caller-supplied data was rejected.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether this error means "the caller asked for something that isn't there"
    /// rather than "the store is broken".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoResult)
    }
}

impl From<pulse_core::errors::CoreError> for DatabaseError {
    fn from(error: pulse_core::errors::CoreError) -> Self {
        use pulse_core::errors::CoreError;
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::InvalidTransition { .. } => Self::InvalidState(error.to_string()),
            other => Self::Other(other.into()),
        }
    }
}
