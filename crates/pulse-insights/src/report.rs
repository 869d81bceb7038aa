//! The insights report: stats, sentiment, keywords, and products.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use pulse_core::entities::{AnalyticsEvent, FeedbackSubmission, Product};
use pulse_core::enums::Sentiment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scale::{RatingScale, mean, round_to, sentiment_for};
use crate::stats::{DashboardStats, dashboard_stats};

const KEYWORD_LIMIT: usize = 10;
const MIN_KEYWORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "did", "does", "doing", "don", "for", "from", "had", "has",
    "have", "her", "here", "him", "his", "how", "into", "its", "just", "like", "more", "most",
    "not", "now", "off", "once", "only", "other", "our", "out", "over", "own", "same", "she",
    "should", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "too", "under", "until", "very", "was", "were", "what",
    "when", "where", "which", "while", "who", "why", "will", "with", "would", "you", "your",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Submissions without a rating.
    pub unrated: usize,
}

impl SentimentBreakdown {
    #[must_use]
    pub const fn rated(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    #[must_use]
    pub const fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductInsight {
    pub product_id: String,
    pub name: String,
    pub submissions: usize,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InsightsReport {
    pub stats: DashboardStats,
    pub rating_scale: RatingScale,
    pub sentiment: SentimentBreakdown,
    pub top_keywords: Vec<KeywordCount>,
    /// Every product of the business, most reviewed first.
    pub products: Vec<ProductInsight>,
    /// Submissions in the 7 days ending at `now`.
    pub this_week: usize,
    /// Submissions in the 7 days before that.
    pub last_week: usize,
}

/// Most frequent words across `texts`, most frequent first, ties by word.
///
/// Words are lowercased runs of letters and digits. Short words, stop words,
/// and pure numbers are skipped.
#[must_use]
pub fn top_keywords<'a>(texts: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let lowered = text.to_lowercase();
        for word in lowered.split(|c: char| !c.is_alphanumeric()) {
            if word.chars().count() < MIN_KEYWORD_LEN
                || STOP_WORDS.contains(&word)
                || word.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    let mut keywords: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(word, count)| KeywordCount { word, count })
        .collect();
    keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    keywords.truncate(limit);
    keywords
}

fn sentiment_breakdown(submissions: &[FeedbackSubmission], scale: RatingScale) -> SentimentBreakdown {
    let mut breakdown = SentimentBreakdown::default();
    for submission in submissions {
        match submission.rating.map(|r| sentiment_for(scale, r)) {
            Some(Sentiment::Positive) => breakdown.positive += 1,
            Some(Sentiment::Neutral) => breakdown.neutral += 1,
            Some(Sentiment::Negative) => breakdown.negative += 1,
            None => breakdown.unrated += 1,
        }
    }
    breakdown
}

fn product_insights(submissions: &[FeedbackSubmission], products: &[Product]) -> Vec<ProductInsight> {
    let mut insights: Vec<ProductInsight> = products
        .iter()
        .map(|product| {
            let reviews: Vec<&FeedbackSubmission> = submissions
                .iter()
                .filter(|s| s.product_id.as_deref() == Some(product.id.as_str()))
                .collect();
            ProductInsight {
                product_id: product.id.clone(),
                name: product.name.clone(),
                submissions: reviews.len(),
                average_rating: mean(reviews.iter().filter_map(|s| s.rating)).map(|m| round_to(m, 2)),
            }
        })
        .collect();
    insights.sort_by(|a, b| b.submissions.cmp(&a.submissions).then_with(|| a.name.cmp(&b.name)));
    insights
}

#[must_use]
pub fn insights_report(
    submissions: &[FeedbackSubmission],
    events: &[AnalyticsEvent],
    products: &[Product],
    now: DateTime<Utc>,
) -> InsightsReport {
    let scale = RatingScale::of_submissions(submissions);
    let week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);
    let in_window = |from: DateTime<Utc>, to: DateTime<Utc>| {
        submissions
            .iter()
            .filter(|s| s.created_at > from && s.created_at <= to)
            .count()
    };

    InsightsReport {
        stats: dashboard_stats(submissions, events, now),
        rating_scale: scale,
        sentiment: sentiment_breakdown(submissions, scale),
        top_keywords: top_keywords(
            submissions.iter().filter_map(|s| s.feedback_text.as_deref()),
            KEYWORD_LIMIT,
        ),
        products: product_insights(submissions, products),
        this_week: in_window(week_ago, now),
        last_week: in_window(two_weeks_ago, week_ago),
    }
}
