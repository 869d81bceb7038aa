//! Dashboard and analytics views for the signed-in business.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use pulse_core::entities::{AnalyticsEvent, FeedbackSubmission};
use pulse_db::{FeedbackStore, SubmissionFilter};
use pulse_insights::{
    AudienceReport, DashboardStats, Highlight, InsightsReport, TrendPoint, audience_report,
    daily_trends, dashboard_stats, highlights, insights_report,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::ServerState;

/// Longest trend window a caller may ask for.
const MAX_TREND_DAYS: u32 = 365;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub trends: Vec<TrendPoint>,
    pub recent_submissions: Vec<FeedbackSubmission>,
}

#[derive(Debug, Serialize)]
pub struct Highlights {
    pub highlights: Vec<Highlight>,
}

async fn load<S: FeedbackStore>(
    state: &ServerState<S>,
    business_id: &str,
) -> Result<(Vec<FeedbackSubmission>, Vec<AnalyticsEvent>), ApiError> {
    let submissions = state
        .store()
        .list_submissions(business_id, &SubmissionFilter::default())
        .await?;
    let events = state.store().list_events(business_id, None).await?;
    Ok((submissions, events))
}

async fn report<S: FeedbackStore>(
    state: &ServerState<S>,
    business_id: &str,
) -> Result<InsightsReport, ApiError> {
    let (submissions, events) = load(state, business_id).await?;
    let products = state.store().list_products(business_id, true).await?;
    Ok(insights_report(&submissions, &events, &products, Utc::now()))
}

#[instrument(skip(state, headers))]
pub async fn dashboard<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<Json<Dashboard>, ApiError> {
    let business_id = state.business_id(&headers)?;
    let (submissions, events) = load(&state, &business_id).await?;
    let now = Utc::now();
    let days = query
        .days
        .unwrap_or(state.general.trend_days)
        .clamp(1, MAX_TREND_DAYS);
    let limit = query.limit.unwrap_or(state.general.default_limit) as usize;

    Ok(Json(Dashboard {
        stats: dashboard_stats(&submissions, &events, now),
        trends: daily_trends(&submissions, days, now),
        recent_submissions: submissions.into_iter().take(limit).collect(),
    }))
}

#[instrument(skip(state, headers))]
pub async fn insights<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
) -> Result<Json<InsightsReport>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(report(&state, &business_id).await?))
}

#[instrument(skip(state, headers))]
pub async fn audience<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
) -> Result<Json<AudienceReport>, ApiError> {
    let business_id = state.business_id(&headers)?;
    let (submissions, _) = load(&state, &business_id).await?;
    Ok(Json(audience_report(&submissions)))
}

/// Rule-based summary of the insights report.
#[instrument(skip(state, headers))]
pub async fn ai_insights<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Highlights>, ApiError> {
    let business_id = state.business_id(&headers)?;
    let report = report(&state, &business_id).await?;
    Ok(Json(Highlights {
        highlights: highlights(&report),
    }))
}
