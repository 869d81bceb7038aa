//! Registration and login for businesses and customers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use pulse_auth::{Credentials, RegisterBusiness, RegisterCustomer};
use pulse_core::responses::AuthResponse;
use pulse_db::FeedbackStore;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

#[instrument(skip_all, fields(slug = ?input.slug))]
pub async fn register_business<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    ApiJson(input): ApiJson<RegisterBusiness>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = state.auth.register_business(state.store(), input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip_all)]
pub async fn login_business<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(
        state
            .auth
            .authenticate_business(state.store(), credentials)
            .await?,
    ))
}

#[instrument(skip_all)]
pub async fn register_customer<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    ApiJson(input): ApiJson<RegisterCustomer>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = state.auth.register_customer(state.store(), input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip_all)]
pub async fn login_customer<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(
        state
            .auth
            .authenticate_customer(state.store(), credentials)
            .await?,
    ))
}
