//! Interpreting raw submission values.

use serde_json::Value;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Whether a submission value carries no answer.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Parse a rating from a number or numeric string, keeping it only if it lies
/// in `[MIN_RATING, MAX_RATING]`.
#[must_use]
pub fn parse_rating(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && (MIN_RATING..=MAX_RATING).contains(&n)).then_some(n)
}

/// A JSON integer in the rating range. Strings do not count.
pub(crate) fn integer_rating(value: &Value) -> Option<f64> {
    let Value::Number(n) = value else {
        return None;
    };
    let n = n.as_f64()?;
    if n.fract() != 0.0 {
        return None;
    }
    parse_rating(&Value::from(n))
}

/// A non-blank string answer, trimmed.
pub(crate) fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
