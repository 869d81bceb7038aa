//! Rating scale detection and rating-derived buckets.
//!
//! Forms may rate out of 5 or out of 10. The scale of a data set is 10 if any
//! rating exceeds 5, otherwise 5. Buckets use the rating normalized to that
//! scale: at least 0.8 is a promoter (positive), at least 0.6 is passive
//! (neutral), anything lower is a detractor (negative).

use pulse_core::entities::FeedbackSubmission;
use pulse_core::enums::{Segment, Sentiment};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const PROMOTER_THRESHOLD: f64 = 0.8;
const PASSIVE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RatingScale {
    FivePoint,
    TenPoint,
}

impl RatingScale {
    /// Detect the scale from a set of ratings.
    pub fn detect(ratings: impl IntoIterator<Item = f64>) -> Self {
        if ratings.into_iter().any(|r| r > 5.0) {
            Self::TenPoint
        } else {
            Self::FivePoint
        }
    }

    #[must_use]
    pub fn of_submissions(submissions: &[FeedbackSubmission]) -> Self {
        Self::detect(submissions.iter().filter_map(|s| s.rating))
    }

    #[must_use]
    pub const fn max(self) -> f64 {
        match self {
            Self::FivePoint => 5.0,
            Self::TenPoint => 10.0,
        }
    }

    /// `rating / max`, clamped to `[0, 1]`.
    #[must_use]
    pub fn normalize(self, rating: f64) -> f64 {
        (rating / self.max()).clamp(0.0, 1.0)
    }

    /// Segment for an (average) rating; `None` means the customer is silent.
    #[must_use]
    pub fn segment(self, rating: Option<f64>) -> Segment {
        match rating.map(|r| self.normalize(r)) {
            None => Segment::Silent,
            Some(n) if n >= PROMOTER_THRESHOLD => Segment::Promoter,
            Some(n) if n >= PASSIVE_THRESHOLD => Segment::Passive,
            Some(_) => Segment::Detractor,
        }
    }
}

/// Sentiment of one rating on `scale`.
#[must_use]
pub fn sentiment_for(scale: RatingScale, rating: f64) -> Sentiment {
    let n = scale.normalize(rating);
    if n >= PROMOTER_THRESHOLD {
        Sentiment::Positive
    } else if n >= PASSIVE_THRESHOLD {
        Sentiment::Neutral
    } else {
        Sentiment::Negative
    }
}

/// Mean of the values, `None` when empty.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Round to `places` decimals for presentation.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn scale_detection() {
        assert_eq!(RatingScale::detect([1.0, 5.0]), RatingScale::FivePoint);
        assert_eq!(RatingScale::detect([5.0, 6.0]), RatingScale::TenPoint);
        assert_eq!(RatingScale::detect([]), RatingScale::FivePoint);
    }

    #[rstest]
    #[case(RatingScale::FivePoint, Some(5.0), Segment::Promoter)]
    #[case(RatingScale::FivePoint, Some(4.0), Segment::Promoter)]
    #[case(RatingScale::FivePoint, Some(3.0), Segment::Passive)]
    #[case(RatingScale::FivePoint, Some(2.9), Segment::Detractor)]
    #[case(RatingScale::TenPoint, Some(8.0), Segment::Promoter)]
    #[case(RatingScale::TenPoint, Some(7.0), Segment::Passive)]
    #[case(RatingScale::TenPoint, Some(5.0), Segment::Detractor)]
    #[case(RatingScale::TenPoint, None, Segment::Silent)]
    fn segments(#[case] scale: RatingScale, #[case] rating: Option<f64>, #[case] expected: Segment) {
        assert_eq!(scale.segment(rating), expected);
    }

    #[test]
    fn sentiment_matches_segment_thresholds() {
        assert_eq!(sentiment_for(RatingScale::FivePoint, 4.0), Sentiment::Positive);
        assert_eq!(sentiment_for(RatingScale::FivePoint, 3.0), Sentiment::Neutral);
        assert_eq!(sentiment_for(RatingScale::FivePoint, 1.0), Sentiment::Negative);
    }

    #[test]
    fn mean_and_rounding() {
        assert_eq!(mean([]), None);
        assert_eq!(mean([2.0, 4.0]), Some(3.0));
        assert!((round_to(3.456, 2) - 3.46).abs() < 1e-9);
    }
}
