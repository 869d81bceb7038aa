use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FieldCategory, FieldType, FormStatus};

/// One input on a feedback form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Explicit category tag set by the form author. Overrides pattern matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_category: Option<FieldCategory>,
}

impl FormField {
    /// Shorthand for an untagged, optional field.
    #[must_use]
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            placeholder: None,
            options: Vec::new(),
            field_category: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: FieldCategory) -> Self {
        self.field_category = Some(category);
        self
    }
}

/// Ordered list of fields shown on a business's feedback page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeedbackForm {
    pub id: String,
    pub business_id: String,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    pub status: FormStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl FeedbackForm {
    /// Look up a field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}
