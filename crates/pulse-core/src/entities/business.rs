use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tenant account owning a feedback page, its forms, and its submissions.
///
/// `password_hash` is never serialized; it only travels between the store and
/// the auth layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[schemars(skip)]
    pub password_hash: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub brand_color: Option<String>,
    pub website: Option<String>,
    pub welcome_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
