//! Response types shared by the HTTP API and the `pulse` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Business, FeedbackForm, SocialLink, User};

/// The subset of a business shown on its public feedback page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PublicBusiness {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub brand_color: Option<String>,
    pub website: Option<String>,
    pub welcome_message: Option<String>,
}

impl From<&Business> for PublicBusiness {
    fn from(b: &Business) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            slug: b.slug.clone(),
            description: b.description.clone(),
            logo_url: b.logo_url.clone(),
            brand_color: b.brand_color.clone(),
            website: b.website.clone(),
            welcome_message: b.welcome_message.clone(),
        }
    }
}

/// Response from `GET /api/page/{slug}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PublicPage {
    pub business: PublicBusiness,
    pub form: Option<FeedbackForm>,
    pub social_links: Vec<SocialLink>,
}

/// Response from the login and register endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Response from `pulse categorize` and the categorization preview.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractionPreview {
    pub categorizations: Vec<crate::entities::FieldCategorization>,
    pub rating: Option<f64>,
    pub feedback_text: Option<String>,
}
