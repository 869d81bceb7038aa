use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A link shown on the public feedback page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SocialLink {
    pub id: String,
    pub business_id: String,
    pub platform: String,
    pub url: String,
    pub display_order: u32,
}
