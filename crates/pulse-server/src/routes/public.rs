//! Unauthenticated endpoints behind a business's public feedback page.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use pulse_core::entities::{AnalyticsEvent, FeedbackSubmission};
use pulse_core::enums::EventType;
use pulse_core::responses::PublicPage;
use pulse_db::{FeedbackInput, FeedbackStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub backend: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub event_type: EventType,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[instrument(skip(state))]
pub async fn health<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Json<Health> {
    Json(Health {
        status: "ok",
        backend: state.store().backend_kind(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(skip(state))]
pub async fn page<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Path(slug): Path<String>,
) -> Result<Json<PublicPage>, ApiError> {
    Ok(Json(state.service.public_page(&slug).await?))
}

#[instrument(skip(state, request), fields(event = %request.event_type))]
pub async fn record_event<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Path(slug): Path<String>,
    ApiJson(request): ApiJson<EventRequest>,
) -> Result<(StatusCode, Json<AnalyticsEvent>), ApiError> {
    let event = state
        .service
        .record_page_event(&slug, request.event_type, request.metadata)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Anonymous, or signed in with a customer token.
#[instrument(skip(state, headers, input), fields(answers = input.data.len()))]
pub async fn submit_feedback<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<FeedbackInput>,
) -> Result<(StatusCode, Json<FeedbackSubmission>), ApiError> {
    let user_id = state.optional_customer_id(&headers)?;
    let submission = state
        .service
        .submit_feedback(&slug, input, user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no such endpoint".into())
}

