//! Status enums, field types, categories, and event types for Pulse.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `as_str()` returns the same string, which is what the SQL store persists.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Declared input type of a form field.
///
/// Unknown types coming from older form definitions deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Tel,
    Number,
    Rating,
    Select,
    Radio,
    Checkbox,
    Date,
    #[serde(other)]
    Other,
}

impl FieldType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Rating => "rating",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldCategory
// ---------------------------------------------------------------------------

/// Semantic role of a form field, used to pull analytics values out of
/// free-form submissions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Rating,
    FeedbackText,
    Recommendation,
    Contact,
    PersonalInfo,
    Product,
    Demographic,
    Custom,
}

impl FieldCategory {
    pub const ALL: [Self; 8] = [
        Self::Rating,
        Self::FeedbackText,
        Self::Recommendation,
        Self::Contact,
        Self::PersonalInfo,
        Self::Product,
        Self::Demographic,
        Self::Custom,
    ];

    /// Priority used when several fields compete for the same category.
    #[must_use]
    pub const fn default_priority(self) -> u8 {
        match self {
            Self::Rating => 10,
            Self::FeedbackText => 9,
            Self::Recommendation => 7,
            Self::Contact => 5,
            Self::PersonalInfo => 4,
            Self::Product => 3,
            Self::Demographic => 2,
            Self::Custom => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::FeedbackText => "feedback_text",
            Self::Recommendation => "recommendation",
            Self::Contact => "contact",
            Self::PersonalInfo => "personal_info",
            Self::Product => "product",
            Self::Demographic => "demographic",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CategorizationSource
// ---------------------------------------------------------------------------

/// How a field's category was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategorizationSource {
    /// The form author tagged the field with `field_category`.
    Explicit,
    /// Matched by id/label/type patterns.
    Pattern,
    /// Nothing matched; fell back to `custom`.
    Default,
}

impl CategorizationSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Pattern => "pattern",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for CategorizationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FormStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a feedback form.
///
/// ```text
/// draft → published → archived
///       → archived    → draft
/// published → draft (unpublish)
/// archived → published (restore)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Draft,
    Published,
    Archived,
}

impl FormStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Published, Self::Archived],
            Self::Published => &[Self::Archived, Self::Draft],
            Self::Archived => &[Self::Draft, Self::Published],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role of a user account, either towards a business or as an end customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Owner,
    Admin,
    Viewer,
    Customer,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Viewer => "viewer",
            Self::Customer => "customer",
        }
    }

    /// Whether this role may change business data.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Analytics event recorded from the public feedback page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    FormStart,
    FormSubmit,
    LinkClick,
}

impl EventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageView => "page_view",
            Self::FormStart => "form_start",
            Self::FormSubmit => "form_submit",
            Self::LinkClick => "link_click",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// Customer segment derived from ratings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Promoter,
    Passive,
    Detractor,
    /// Customer left feedback without a usable rating.
    Silent,
}

impl Segment {
    pub const ALL: [Self; 4] = [Self::Promoter, Self::Passive, Self::Detractor, Self::Silent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Promoter => "promoter",
            Self::Passive => "passive",
            Self::Detractor => "detractor",
            Self::Silent => "silent",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Coarse sentiment bucket of a single submission, derived from its rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_type_unknown_deserializes_to_other() {
        let ty: FieldType = serde_json::from_str("\"star_slider\"").unwrap();
        assert_eq!(ty, FieldType::Other);
        let ty: FieldType = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(ty, FieldType::Textarea);
    }

    #[test]
    fn as_str_matches_serde() {
        for category in FieldCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json.as_str(), Some(category.as_str()));
        }
        for segment in Segment::ALL {
            let json = serde_json::to_value(segment).unwrap();
            assert_eq!(json.as_str(), Some(segment.as_str()));
        }
        let json = serde_json::to_value(EventType::PageView).unwrap();
        assert_eq!(json.as_str(), Some("page_view"));
    }

    #[test]
    fn category_priorities_are_ordered() {
        let priorities: Vec<u8> = FieldCategory::ALL
            .iter()
            .map(|c| c.default_priority())
            .collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
        assert_eq!(FieldCategory::Custom.default_priority(), 1);
    }

    #[test]
    fn form_status_transitions() {
        assert!(FormStatus::Draft.can_transition_to(FormStatus::Published));
        assert!(FormStatus::Published.can_transition_to(FormStatus::Archived));
        assert!(!FormStatus::Draft.can_transition_to(FormStatus::Draft));
        assert!(!FormStatus::Published.can_transition_to(FormStatus::Published));
    }

    #[test]
    fn manage_roles() {
        assert!(UserRole::Owner.can_manage());
        assert!(UserRole::Admin.can_manage());
        assert!(!UserRole::Viewer.can_manage());
        assert!(!UserRole::Customer.can_manage());
    }
}
