//! Form draft update builder.

use pulse_core::entities::FormField;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FormField>>,
}

impl FormUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.fields.is_none()
    }
}

pub struct FormUpdateBuilder(FormUpdate);

impl FormUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(FormUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: Vec<FormField>) -> Self {
        self.0.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn build(self) -> FormUpdate {
        self.0
    }
}

impl Default for FormUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
