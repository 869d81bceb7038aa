//! Categorization-driven extraction.

use std::collections::BTreeMap;

use pulse_core::entities::FieldCategorization;
use pulse_core::enums::FieldCategory;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::values::{is_blank, parse_rating, text_value};

/// One non-blank submission value together with its field's categorization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedValue {
    pub field_id: String,
    pub value: Value,
    pub priority: u8,
    pub confidence: f64,
}

impl CategorizedValue {
    fn weight(&self) -> f64 {
        f64::from(self.priority) * self.confidence
    }
}

/// Submission values grouped by category, plus the picked rating and text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedData {
    pub by_category: BTreeMap<FieldCategory, Vec<CategorizedValue>>,
    pub rating: Option<f64>,
    pub feedback_text: Option<String>,
}

impl CategorizedData {
    /// Values for one category, in categorization order.
    #[must_use]
    pub fn values(&self, category: FieldCategory) -> &[CategorizedValue] {
        self.by_category.get(&category).map_or(&[], Vec::as_slice)
    }
}

/// Highest `priority × confidence`; the first one wins a tie.
fn best(values: &[CategorizedValue]) -> Option<&CategorizedValue> {
    let mut best: Option<&CategorizedValue> = None;
    for candidate in values {
        if best.is_none_or(|top| candidate.weight() > top.weight()) {
            best = Some(candidate);
        }
    }
    best
}

/// Group a submission's values by category and pick the rating and feedback text.
///
/// Values are looked up by `field_id`; blank answers and fields the submission
/// does not contain are skipped. The picked rating must parse and lie in
/// `[1, 10]`, otherwise it is `None`. The picked feedback text must be a
/// non-blank string.
#[must_use]
pub fn extract_categorized_data(
    submission: &Map<String, Value>,
    categorizations: &[FieldCategorization],
) -> CategorizedData {
    let mut by_category: BTreeMap<FieldCategory, Vec<CategorizedValue>> = BTreeMap::new();

    for cat in categorizations {
        let Some(value) = submission.get(&cat.field_id) else {
            continue;
        };
        if is_blank(value) {
            continue;
        }
        by_category
            .entry(cat.category)
            .or_default()
            .push(CategorizedValue {
                field_id: cat.field_id.clone(),
                value: value.clone(),
                priority: cat.priority,
                confidence: cat.confidence,
            });
    }

    let rating = by_category
        .get(&FieldCategory::Rating)
        .and_then(|values| best(values))
        .and_then(|picked| parse_rating(&picked.value));

    let feedback_text = by_category
        .get(&FieldCategory::FeedbackText)
        .and_then(|values| best(values))
        .and_then(|picked| text_value(&picked.value));

    CategorizedData {
        by_category,
        rating,
        feedback_text,
    }
}
