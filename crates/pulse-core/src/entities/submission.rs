use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A customer's answer set for a feedback form.
///
/// `data` is keyed by field id. `rating` and `feedback_text` are extracted from
/// it when the submission is stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FeedbackSubmission {
    pub id: String,
    pub business_id: String,
    pub form_id: Option<String>,
    pub user_id: Option<String>,
    pub product_id: Option<String>,
    pub data: serde_json::Map<String, serde_json::Value>,
    pub rating: Option<f64>,
    pub feedback_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
