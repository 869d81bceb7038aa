use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CategorizationSource, FieldCategory};

/// The category assigned to one form field, with the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FieldCategorization {
    pub field_id: String,
    pub category: FieldCategory,
    pub priority: u8,
    /// In `[0.0, 1.0]`.
    pub confidence: f64,
    pub source: CategorizationSource,
}

impl FieldCategorization {
    /// Ranking weight used when several fields share a category.
    #[must_use]
    pub fn weight(&self) -> f64 {
        f64::from(self.priority) * self.confidence
    }
}
