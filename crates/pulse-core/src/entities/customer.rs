use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Segment;

/// Aggregate view of one customer's submissions to a business. Derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CustomerProfile {
    /// `user:{id}`, `email:{address}`, or `anon:{submission id}`.
    pub customer_key: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub submission_count: u32,
    pub average_rating: Option<f64>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub segment: Segment,
}

/// Size and rating of one segment. Derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CustomerSegment {
    pub segment: Segment,
    pub count: u32,
    pub percentage: f64,
    pub average_rating: Option<f64>,
}
