//! # pulse-insights
//!
//! Pure analytics over a business's submissions, events, and products.
//!
//! Nothing here touches storage: callers load the rows and pass them in,
//! together with the reference instant `now`, so every function is
//! deterministic and testable without a clock.

pub mod audience;
pub mod highlights;
pub mod report;
pub mod scale;
pub mod stats;
pub mod trends;

pub use audience::{AudienceReport, audience_report, customer_key, segment_customers};
pub use highlights::{Highlight, highlights};
pub use report::{
    InsightsReport, KeywordCount, ProductInsight, SentimentBreakdown, insights_report, top_keywords,
};
pub use scale::{RatingScale, sentiment_for};
pub use stats::{DashboardStats, dashboard_stats};
pub use trends::{TrendPoint, daily_trends};
