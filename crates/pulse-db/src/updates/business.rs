//! Business profile update builder.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub website: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub welcome_message: Option<Option<String>>,
}

impl BusinessUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.logo_url.is_none()
            && self.brand_color.is_none()
            && self.website.is_none()
            && self.welcome_message.is_none()
    }
}

pub struct BusinessUpdateBuilder(BusinessUpdate);

impl BusinessUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(BusinessUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.0.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn logo_url(mut self, logo_url: Option<String>) -> Self {
        self.0.logo_url = Some(logo_url);
        self
    }

    #[must_use]
    pub fn brand_color(mut self, brand_color: Option<String>) -> Self {
        self.0.brand_color = Some(brand_color);
        self
    }

    #[must_use]
    pub fn website(mut self, website: Option<String>) -> Self {
        self.0.website = Some(website);
        self
    }

    #[must_use]
    pub fn welcome_message(mut self, welcome_message: Option<String>) -> Self {
        self.0.welcome_message = Some(welcome_message);
        self
    }

    #[must_use]
    pub fn build(self) -> BusinessUpdate {
        self.0
    }
}

impl Default for BusinessUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
