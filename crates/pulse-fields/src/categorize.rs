//! Field → category scoring.

use pulse_core::entities::{FieldCategorization, FormField};
use pulse_core::enums::{CategorizationSource, FieldCategory};

use crate::rules::{CategoryRule, rule_table};

/// Confidence reported for fields carrying an explicit `field_category`.
pub const EXPLICIT_CONFIDENCE: f64 = 0.95;

// Scores are kept in tenths so equal evidence always produces equal floats.
const ID_MATCH: u8 = 4;
const LABEL_MATCH: u8 = 3;
const TYPE_MATCH: u8 = 3;
const MULTI_MATCH_BOOST: f64 = 1.2;

fn score(rule: &CategoryRule, field: &FormField) -> f64 {
    let hits = [
        (rule.matches_id(&field.id), ID_MATCH),
        (rule.matches_label(&field.label), LABEL_MATCH),
        (rule.expects_type(field.field_type), TYPE_MATCH),
    ];
    let matched = hits.iter().filter(|(hit, _)| *hit).count();
    let tenths: u8 = hits
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, weight)| weight)
        .sum();

    let mut confidence = f64::from(tenths) / 10.0;
    if matched > 1 {
        confidence *= MULTI_MATCH_BOOST;
    }
    confidence.min(1.0)
}

/// Categorize a field from its id, label and declared type.
///
/// The highest-scoring rule wins; ties go to the earlier rule. A field that
/// matches nothing is `custom` with priority 1 and confidence 0.
#[must_use]
pub fn categorize_field(field: &FormField) -> FieldCategorization {
    let mut best: Option<(&CategoryRule, f64)> = None;
    for rule in rule_table() {
        let confidence = score(rule, field);
        if confidence <= 0.0 {
            continue;
        }
        if best.is_none_or(|(_, top)| confidence > top) {
            best = Some((rule, confidence));
        }
    }

    match best {
        Some((rule, confidence)) => FieldCategorization {
            field_id: field.id.clone(),
            category: rule.category,
            priority: rule.priority,
            confidence,
            source: CategorizationSource::Pattern,
        },
        None => FieldCategorization {
            field_id: field.id.clone(),
            category: FieldCategory::Custom,
            priority: FieldCategory::Custom.default_priority(),
            confidence: 0.0,
            source: CategorizationSource::Default,
        },
    }
}

/// Like [`categorize_field`], but an explicit `field_category` tag wins outright.
#[must_use]
pub fn categorize_field_enhanced(field: &FormField) -> FieldCategorization {
    match field.field_category {
        Some(category) => FieldCategorization {
            field_id: field.id.clone(),
            category,
            priority: category.default_priority(),
            confidence: EXPLICIT_CONFIDENCE,
            source: CategorizationSource::Explicit,
        },
        None => categorize_field(field),
    }
}

/// Categorize every field of a form, preserving field order.
#[must_use]
pub fn categorize_form(fields: &[FormField]) -> Vec<FieldCategorization> {
    fields.iter().map(categorize_field_enhanced).collect()
}
