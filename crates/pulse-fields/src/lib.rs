//! # pulse-fields
//!
//! Heuristics that find "the rating" and "the feedback text" in a submission
//! without relying on the key names a form author picked.
//!
//! Two layers:
//! - **Categorization** ([`categorize_field`], [`categorize_field_enhanced`],
//!   [`categorize_form`]) scores each form field against a rule table of
//!   id/label regexes and expected input types.
//! - **Extraction** ([`extract_categorized_data`], [`extract_data_with_fallback`])
//!   pulls values out of a submission using those categorizations, and falls
//!   back to name/value heuristics ([`find_rating_field_intelligent`],
//!   [`find_feedback_text_intelligent`]) when there are none.
//!
//! Everything here is pure and deterministic. Submission keys are visited in
//! document order.

mod categorize;
mod extract;
mod fallback;
mod rules;
mod values;

pub use categorize::{
    EXPLICIT_CONFIDENCE, categorize_field, categorize_field_enhanced, categorize_form,
};
pub use extract::{CategorizedData, CategorizedValue, extract_categorized_data};
pub use fallback::{
    ExtractedFeedback, extract_data_with_fallback, extract_with_fields,
    find_feedback_text_intelligent, find_rating_field_intelligent,
};
pub use rules::{CategoryRule, rule_table};
pub use values::{MAX_RATING, MIN_RATING, parse_rating};
