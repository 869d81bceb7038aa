//! Form management for the signed-in business.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use pulse_core::entities::{FeedbackForm, FormField};
use pulse_core::enums::FormStatus;
use pulse_db::{FeedbackStore, FormUpdate, NewForm};
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub form_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: FormStatus,
}

#[instrument(skip(state, headers))]
pub async fn list<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<FeedbackForm>>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(state.store().list_forms(&business_id).await?))
}

#[instrument(skip(state, headers, input), fields(fields = input.fields.len()))]
pub async fn create<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<CreateForm>,
) -> Result<(StatusCode, Json<FeedbackForm>), ApiError> {
    let business_id = state.business_id(&headers)?;
    let form = state
        .service
        .create_form(NewForm {
            business_id,
            title: input.title,
            description: input.description,
            fields: input.fields,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(form)))
}

#[instrument(skip(state, headers, update))]
pub async fn update<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    Path(form_id): Path<String>,
    ApiJson(update): ApiJson<FormUpdate>,
) -> Result<Json<FeedbackForm>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(
        state
            .service
            .update_form(&business_id, &form_id, update)
            .await?,
    ))
}

#[instrument(skip(state, headers))]
pub async fn publish<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<PublishRequest>,
) -> Result<Json<FeedbackForm>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(
        state
            .service
            .publish_form(&business_id, &request.form_id)
            .await?,
    ))
}

#[instrument(skip(state, headers))]
pub async fn set_status<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    Path(form_id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> Result<Json<FeedbackForm>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(
        state
            .service
            .set_form_status(&business_id, &form_id, request.status)
            .await?,
    ))
}
