use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventType;

/// A page-level analytics ping.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalyticsEvent {
    pub id: String,
    pub business_id: String,
    pub event_type: EventType,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
