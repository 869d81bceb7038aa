//! Customer profiles and segments.
//!
//! Submissions are grouped per customer: the signed-in user id when present,
//! otherwise an email address found in the answers, otherwise each anonymous
//! submission is its own customer.

use std::collections::HashMap;

use pulse_core::entities::{CustomerProfile, CustomerSegment, FeedbackSubmission};
use pulse_core::enums::Segment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scale::{RatingScale, mean, round_to};
use crate::stats::percentage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudienceReport {
    pub total_customers: usize,
    pub rating_scale: RatingScale,
    /// Most recently seen first.
    pub profiles: Vec<CustomerProfile>,
    /// One entry per segment, in [`Segment::ALL`] order.
    pub segments: Vec<CustomerSegment>,
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}

/// First email-looking answer, preferring keys that mention "mail".
fn email_in(data: &Map<String, Value>) -> Option<String> {
    let candidates = || {
        data.iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.trim())))
            .filter(|(_, s)| looks_like_email(s))
    };
    candidates()
        .find(|(k, _)| k.to_ascii_lowercase().contains("mail"))
        .or_else(|| candidates().next())
        .map(|(_, s)| s.to_ascii_lowercase())
}

/// `user:{id}`, `email:{address}`, or `anon:{submission id}`.
#[must_use]
pub fn customer_key(submission: &FeedbackSubmission) -> String {
    if let Some(user_id) = &submission.user_id {
        return format!("user:{user_id}");
    }
    email_in(&submission.data).map_or_else(
        || format!("anon:{}", submission.id),
        |email| format!("email:{email}"),
    )
}

/// Build one profile per customer, most recently seen first.
#[must_use]
pub fn segment_customers(submissions: &[FeedbackSubmission]) -> Vec<CustomerProfile> {
    let scale = RatingScale::of_submissions(submissions);
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&FeedbackSubmission>> = HashMap::new();
    for submission in submissions {
        let key = customer_key(submission);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(submission);
    }

    let mut profiles: Vec<CustomerProfile> = order
        .into_iter()
        .filter_map(|key| {
            let group = groups.remove(&key)?;
            let first_seen = group.iter().map(|s| s.created_at).min()?;
            let last_seen = group.iter().map(|s| s.created_at).max()?;
            let average_rating = mean(group.iter().filter_map(|s| s.rating));
            Some(CustomerProfile {
                user_id: group.iter().find_map(|s| s.user_id.clone()),
                email: group.iter().find_map(|s| email_in(&s.data)),
                submission_count: u32::try_from(group.len()).unwrap_or(u32::MAX),
                average_rating: average_rating.map(|m| round_to(m, 2)),
                first_seen,
                last_seen,
                segment: scale.segment(average_rating),
                customer_key: key,
            })
        })
        .collect();
    profiles.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    profiles
}

/// Profiles plus per-segment counts, shares, and average ratings.
#[must_use]
pub fn audience_report(submissions: &[FeedbackSubmission]) -> AudienceReport {
    let profiles = segment_customers(submissions);
    let total = profiles.len();
    let segments = Segment::ALL
        .iter()
        .map(|&segment| {
            let members: Vec<&CustomerProfile> =
                profiles.iter().filter(|p| p.segment == segment).collect();
            CustomerSegment {
                segment,
                count: u32::try_from(members.len()).unwrap_or(u32::MAX),
                percentage: percentage(members.len(), total),
                average_rating: mean(members.iter().filter_map(|p| p.average_rating))
                    .map(|m| round_to(m, 2)),
            }
        })
        .collect();

    AudienceReport {
        total_customers: total,
        rating_scale: RatingScale::of_submissions(submissions),
        profiles,
        segments,
    }
}
