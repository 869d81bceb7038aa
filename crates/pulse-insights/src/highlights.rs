//! Short, rule-based summary sentences derived from an [`InsightsReport`].
//!
//! Rules fire in a fixed order, so the same report always produces the same
//! list.

use pulse_core::enums::Sentiment;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::report::{InsightsReport, ProductInsight};
use crate::scale::sentiment_for;

/// Page views needed before a low conversion rate is worth mentioning.
const MIN_VIEWS_FOR_CONVERSION: usize = 20;
const LOW_CONVERSION_PERCENT: f64 = 5.0;
const HIGH_NEGATIVE_PERCENT: usize = 30;
const MIN_KEYWORD_MENTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Highlight {
    pub title: String,
    pub detail: String,
    pub tone: Sentiment,
}

impl Highlight {
    fn new(title: impl Into<String>, detail: impl Into<String>, tone: Sentiment) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            tone,
        }
    }
}

#[must_use]
pub fn highlights(report: &InsightsReport) -> Vec<Highlight> {
    let stats = &report.stats;
    if stats.total_submissions == 0 {
        return vec![Highlight::new(
            "No feedback yet",
            "Share your feedback page to start hearing from customers.",
            Sentiment::Neutral,
        )];
    }

    let mut out = Vec::new();
    let max = report.rating_scale.max();

    if let Some(avg) = stats.average_rating {
        let tone = sentiment_for(report.rating_scale, avg);
        let title = match tone {
            Sentiment::Positive => "Customers are happy",
            Sentiment::Neutral => "Mixed customer ratings",
            Sentiment::Negative => "Customers are unhappy",
        };
        out.push(Highlight::new(
            title,
            format!("Average rating is {avg:.1} out of {max:.0}."),
            tone,
        ));
    }

    out.extend(week_over_week(report.this_week, report.last_week));

    if stats.total_page_views >= MIN_VIEWS_FOR_CONVERSION
        && stats.conversion_rate < LOW_CONVERSION_PERCENT
    {
        out.push(Highlight::new(
            "Few visitors leave feedback",
            format!(
                "Only {:.1}% of {} page views led to a submission.",
                stats.conversion_rate, stats.total_page_views
            ),
            Sentiment::Negative,
        ));
    }

    let rated = report.sentiment.rated();
    if rated > 0 && report.sentiment.negative * 100 >= rated * HIGH_NEGATIVE_PERCENT {
        out.push(Highlight::new(
            "Many negative ratings",
            format!(
                "{} of {rated} rated submissions are negative.",
                report.sentiment.negative
            ),
            Sentiment::Negative,
        ));
    }

    if let Some(top) = report
        .top_keywords
        .first()
        .filter(|k| k.count >= MIN_KEYWORD_MENTIONS)
    {
        out.push(Highlight::new(
            "Most mentioned",
            format!("Customers mentioned \"{}\" {} times.", top.word, top.count),
            Sentiment::Neutral,
        ));
    }

    out.extend(product_extremes(report));
    out
}

fn week_over_week(this_week: usize, last_week: usize) -> Option<Highlight> {
    let detail = format!("{this_week} submissions this week, {last_week} the week before.");
    match this_week.cmp(&last_week) {
        std::cmp::Ordering::Greater => {
            Some(Highlight::new("Feedback is picking up", detail, Sentiment::Positive))
        }
        std::cmp::Ordering::Less => {
            Some(Highlight::new("Feedback is slowing down", detail, Sentiment::Negative))
        }
        std::cmp::Ordering::Equal => None,
    }
}

/// Best rated product, and the worst one when it rates negatively.
fn product_extremes(report: &InsightsReport) -> Vec<Highlight> {
    let rated: Vec<(&ProductInsight, f64)> = report
        .products
        .iter()
        .filter_map(|p| p.average_rating.map(|r| (p, r)))
        .collect();
    let best = rated.iter().copied().reduce(|best, next| {
        let tied = (next.1 - best.1).abs() < f64::EPSILON;
        if next.1 > best.1 || (tied && next.0.submissions > best.0.submissions) {
            next
        } else {
            best
        }
    });
    let worst = rated
        .iter()
        .copied()
        .reduce(|worst, next| if next.1 < worst.1 { next } else { worst });

    let mut out = Vec::new();
    if let Some((product, rating)) = best {
        out.push(Highlight::new(
            "Top rated product",
            format!(
                "{} averages {rating:.1} across {} reviews.",
                product.name, product.submissions
            ),
            Sentiment::Positive,
        ));
        if let Some((low, low_rating)) = worst {
            if low.product_id != product.product_id
                && sentiment_for(report.rating_scale, low_rating) == Sentiment::Negative
            {
                out.push(Highlight::new(
                    "Product needs attention",
                    format!(
                        "{} averages {low_rating:.1} across {} reviews.",
                        low.name, low.submissions
                    ),
                    Sentiment::Negative,
                ));
            }
        }
    }
    out
}
