use pulse_core::identity::TokenKind;
use pulse_db::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("this endpoint requires a {expected} token")]
    WrongTokenKind { expected: TokenKind },

    /// Covers both an unknown email and a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{0}")]
    Conflict(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Config(#[from] pulse_config::ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl AuthError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
