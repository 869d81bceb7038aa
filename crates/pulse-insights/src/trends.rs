//! Daily submission trends.

use chrono::{DateTime, Days, NaiveDate, Utc};
use pulse_core::entities::FeedbackSubmission;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scale::{mean, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: usize,
    pub average_rating: Option<f64>,
}

/// One point per UTC day for the `days` days ending on `now`'s date, oldest
/// first. Days without submissions have a count of zero.
#[must_use]
pub fn daily_trends(
    submissions: &[FeedbackSubmission],
    days: u32,
    now: DateTime<Utc>,
) -> Vec<TrendPoint> {
    let today = now.date_naive();
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| {
            let day: Vec<&FeedbackSubmission> = submissions
                .iter()
                .filter(|s| s.created_at.date_naive() == date)
                .collect();
            TrendPoint {
                date,
                count: day.len(),
                average_rating: mean(day.iter().filter_map(|s| s.rating)).map(|m| round_to(m, 2)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    fn at(ts: DateTime<Utc>, rating: Option<f64>) -> FeedbackSubmission {
        FeedbackSubmission {
            id: "sub-1".into(),
            business_id: "biz-1".into(),
            form_id: None,
            user_id: None,
            product_id: None,
            data: Map::new(),
            rating,
            feedback_text: None,
            created_at: ts,
        }
    }

    #[test]
    fn fills_gaps_oldest_first() {
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap();
        let subs = vec![
            at(now, Some(4.0)),
            at(now - Duration::hours(1), Some(2.0)),
            at(now - Duration::days(2), None),
            at(now - Duration::days(30), Some(5.0)),
        ];
        let points = daily_trends(&subs, 3, now);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2026, 5, 8).unwrap());
        assert_eq!((points[0].count, points[0].average_rating), (1, None));
        assert_eq!((points[1].count, points[1].average_rating), (0, None));
        assert_eq!((points[2].count, points[2].average_rating), (2, Some(3.0)));
    }

    #[test]
    fn zero_days_is_empty() {
        assert!(daily_trends(&[], 0, Utc::now()).is_empty());
    }
}
