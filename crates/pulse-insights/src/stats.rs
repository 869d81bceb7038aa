//! Headline numbers for the dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use pulse_core::entities::{AnalyticsEvent, FeedbackSubmission};
use pulse_core::enums::EventType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scale::{mean, round_to};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardStats {
    pub total_submissions: usize,
    /// Mean of the submissions that carry a rating, two decimals.
    pub average_rating: Option<f64>,
    pub total_page_views: usize,
    /// Submissions per page view, as a percentage with one decimal. Zero without views.
    pub conversion_rate: f64,
    pub submissions_last_7_days: usize,
    /// Rounded rating to number of submissions.
    pub rating_distribution: BTreeMap<u8, usize>,
}

#[must_use]
pub fn dashboard_stats(
    submissions: &[FeedbackSubmission],
    events: &[AnalyticsEvent],
    now: DateTime<Utc>,
) -> DashboardStats {
    let total_page_views = events
        .iter()
        .filter(|e| e.event_type == EventType::PageView)
        .count();
    let week_ago = now - Duration::days(7);

    let mut rating_distribution = BTreeMap::new();
    for rating in submissions.iter().filter_map(|s| s.rating) {
        *rating_distribution.entry(bucket(rating)).or_insert(0) += 1;
    }

    DashboardStats {
        total_submissions: submissions.len(),
        average_rating: mean(submissions.iter().filter_map(|s| s.rating)).map(|m| round_to(m, 2)),
        total_page_views,
        conversion_rate: percentage(submissions.len(), total_page_views),
        submissions_last_7_days: submissions
            .iter()
            .filter(|s| s.created_at > week_ago && s.created_at <= now)
            .count(),
        rating_distribution,
    }
}

/// `part / whole` as a percentage with one decimal; zero when `whole` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 1)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bucket(rating: f64) -> u8 {
    rating.round().clamp(0.0, f64::from(u8::MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn sub(days_ago: i64, rating: Option<f64>) -> FeedbackSubmission {
        FeedbackSubmission {
            id: format!("sub-{days_ago:08}"),
            business_id: "biz-1".into(),
            form_id: None,
            user_id: None,
            product_id: None,
            data: Map::new(),
            rating,
            feedback_text: None,
            created_at: now() - Duration::days(days_ago),
        }
    }

    fn view() -> AnalyticsEvent {
        AnalyticsEvent {
            id: "evt-1".into(),
            business_id: "biz-1".into(),
            event_type: EventType::PageView,
            metadata: None,
            created_at: now(),
        }
    }

    #[test]
    fn empty_inputs() {
        let stats = dashboard_stats(&[], &[], now());
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn headline_numbers() {
        let subs = vec![
            sub(1, Some(5.0)),
            sub(3, Some(4.0)),
            sub(10, Some(3.6)),
            sub(20, None),
        ];
        let events = vec![view(), view(), view(), view(), view(), view(), view(), view()];
        let stats = dashboard_stats(&subs, &events, now());

        assert_eq!(stats.total_submissions, 4);
        assert_eq!(stats.average_rating, Some(4.2));
        assert_eq!(stats.total_page_views, 8);
        assert!((stats.conversion_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.submissions_last_7_days, 2);
        assert_eq!(
            stats.rating_distribution,
            BTreeMap::from([(4, 2), (5, 1)])
        );
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert!((percentage(1, 3) - 33.3).abs() < 1e-9);
        assert!(percentage(5, 0).abs() < f64::EPSILON);
    }
}
