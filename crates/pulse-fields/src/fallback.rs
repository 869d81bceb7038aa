//! Name/value heuristics for submissions without usable categorizations.

use std::sync::LazyLock;

use pulse_core::entities::{FieldCategorization, FormField};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categorize::categorize_form;
use crate::extract::extract_categorized_data;
use crate::values::{integer_rating, parse_rating, text_value};

/// The two values analytics cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFeedback {
    pub rating: Option<f64>,
    pub feedback_text: Option<String>,
}

const RATING_NAMES: &[&str] = &[
    "rating",
    "Rating",
    "overall_rating",
    "overallRating",
    "score",
    "stars",
    "satisfaction",
];

const FEEDBACK_NAMES: &[&str] = &[
    "feedback",
    "Feedback",
    "message",
    "comment",
    "comments",
    "review",
    "feedback_text",
    "feedbackText",
    "text",
    "description",
];

static RATING_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| lazy_regex(r"(?i)rating|(^|[^a-z])rate($|[^a-z])|score|stars?($|[^a-z])|satisf|overall"));

static NOT_A_RATING_KEY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    lazy_regex(
        r"(?i)id$|count|num|date|time|year|(^|[^a-z])age($|[^a-z])|phone|zip|postal|qty|quantity|amount|price|index|total",
    )
});

static FEEDBACK_KEY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    lazy_regex(
        r"(?i)feedback|comment|message|review|suggest|opinion|thought|notes?($|[^a-z])|describe|experience|improve|remarks?",
    )
});

static PERSONAL_INFO_KEY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    lazy_regex(
        r"(?i)name|e-?mail|phone|mobile|(^|[^a-z])tel($|[^a-z])|address|street|city|state|zip|postal|country|company|website|url|password|token",
    )
});

fn lazy_regex(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(error) => {
            tracing::error!(%error, pattern, "invalid fallback pattern");
            None
        }
    }
}

fn key_matches(re: Option<&Regex>, key: &str) -> bool {
    re.is_some_and(|re| re.is_match(key))
}

/// Find a rating in an arbitrary submission.
///
/// 1. Well-known key names, in a fixed order.
/// 2. Any key that looks like a rating.
/// 3. Any integer 1–10 whose key does not look like an id, count, date, or amount.
///
/// Every stage skips values that do not parse or fall outside `[1, 10]`.
#[must_use]
pub fn find_rating_field_intelligent(data: &Map<String, Value>) -> Option<f64> {
    RATING_NAMES
        .iter()
        .filter_map(|name| data.get(*name))
        .find_map(parse_rating)
        .or_else(|| {
            data.iter()
                .filter(|(key, _)| key_matches(RATING_KEY.as_ref(), key))
                .find_map(|(_, value)| parse_rating(value))
        })
        .or_else(|| {
            data.iter()
                .filter(|(key, _)| !key_matches(NOT_A_RATING_KEY.as_ref(), key))
                .find_map(|(_, value)| integer_rating(value))
        })
}

/// Find the free-text feedback in an arbitrary submission.
///
/// 1. Well-known key names, in a fixed order.
/// 2. Any key that looks like feedback.
/// 3. The longest string whose key does not look like personal information.
#[must_use]
pub fn find_feedback_text_intelligent(data: &Map<String, Value>) -> Option<String> {
    FEEDBACK_NAMES
        .iter()
        .filter_map(|name| data.get(*name))
        .find_map(text_value)
        .or_else(|| {
            data.iter()
                .filter(|(key, _)| key_matches(FEEDBACK_KEY.as_ref(), key))
                .find_map(|(_, value)| text_value(value))
        })
        .or_else(|| {
            let mut longest: Option<String> = None;
            for (key, value) in data {
                if key_matches(PERSONAL_INFO_KEY.as_ref(), key) {
                    continue;
                }
                let Some(text) = text_value(value) else {
                    continue;
                };
                if longest
                    .as_ref()
                    .is_none_or(|top| text.chars().count() > top.chars().count())
                {
                    longest = Some(text);
                }
            }
            longest
        })
}

/// Extract rating and feedback text, preferring categorizations when present.
///
/// Anything the categorizations leave empty is filled in by the name/value
/// heuristics.
#[must_use]
pub fn extract_data_with_fallback(
    submission: &Map<String, Value>,
    categorizations: Option<&[FieldCategorization]>,
) -> ExtractedFeedback {
    let (mut rating, mut feedback_text) = match categorizations {
        Some(cats) if !cats.is_empty() => {
            let data = extract_categorized_data(submission, cats);
            (data.rating, data.feedback_text)
        }
        _ => (None, None),
    };

    if rating.is_none() {
        rating = find_rating_field_intelligent(submission);
    }
    if feedback_text.is_none() {
        feedback_text = find_feedback_text_intelligent(submission);
    }

    ExtractedFeedback {
        rating,
        feedback_text,
    }
}

/// Categorize `fields` and extract from `submission` in one step.
#[must_use]
pub fn extract_with_fields(
    submission: &Map<String, Value>,
    fields: &[FormField],
) -> (Vec<FieldCategorization>, ExtractedFeedback) {
    let categorizations = categorize_form(fields);
    let extracted = extract_data_with_fallback(submission, Some(categorizations.as_slice()));
    (categorizations, extracted)
}
