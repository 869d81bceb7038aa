use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of account a token was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// A business owner; `subject_id` is a business id.
    Business,
    /// An end customer; `subject_id` is a user id.
    Customer,
}

impl TokenKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight authenticated identity for cross-crate passing.
///
/// Produced by `pulse-auth` from a verified token, consumed by `pulse-server`.
/// Contains only data fields, no auth logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    pub subject_id: String,
    pub kind: TokenKind,
    pub email: String,
}

impl AuthIdentity {
    /// The business id, if this identity is a business owner.
    #[must_use]
    pub fn business_id(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Business => Some(&self.subject_id),
            TokenKind::Customer => None,
        }
    }

    /// The user id, if this identity is a customer.
    #[must_use]
    pub fn customer_id(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Customer => Some(&self.subject_id),
            TokenKind::Business => None,
        }
    }
}
