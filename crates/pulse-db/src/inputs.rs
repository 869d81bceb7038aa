//! Creation inputs and list filters.
//!
//! Stores assign ids and timestamps; these carry everything else.

use chrono::{DateTime, Utc};
use pulse_core::entities::FormField;
use pulse_core::enums::{EventType, UserRole};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBusiness {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForm {
    pub business_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub business_id: String,
    pub form_id: Option<String>,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub data: Map<String, Value>,
    pub rating: Option<f64>,
    pub feedback_text: Option<String>,
    /// Backdating for imports and the demo seed; `None` means now.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub business_id: String,
    pub event_type: EventType,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewEvent {
    #[must_use]
    pub fn new(business_id: impl Into<String>, event_type: EventType) -> Self {
        Self {
            business_id: business_id.into(),
            event_type,
            metadata: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub const fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub business_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A social link as submitted; position in the list becomes `display_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSocialLink {
    pub platform: String,
    pub url: String,
}

/// Filter for [`crate::FeedbackStore::list_submissions`]. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFilter {
    /// Only submissions created at or after this instant.
    pub since: Option<DateTime<Utc>>,
    pub product_id: Option<String>,
    pub limit: Option<u32>,
}

impl SubmissionFilter {
    #[must_use]
    pub const fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
