//! Product catalog for the signed-in business.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use pulse_core::entities::Product;
use pulse_db::{FeedbackStore, NewProduct, ProductUpdate};
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn product_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("product name must not be empty".into()));
    }
    Ok(name.to_string())
}

#[instrument(skip(state, headers))]
pub async fn list<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(
        state
            .store()
            .list_products(&business_id, query.include_inactive)
            .await?,
    ))
}

#[instrument(skip(state, headers, input), fields(name = %input.name))]
pub async fn create<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let business_id = state.business_id(&headers)?;
    let product = state
        .store()
        .create_product(NewProduct {
            business_id,
            name: product_name(&input.name)?,
            description: input.description,
            category: input.category,
            image_url: input.image_url,
        })
        .await?;
    tracing::debug!(product = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, headers))]
pub async fn get<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(
        state
            .service
            .owned_product(&business_id, &product_id)
            .await?,
    ))
}

#[instrument(skip(state, headers, update))]
pub async fn update<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    ApiJson(mut update): ApiJson<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let business_id = state.business_id(&headers)?;
    state
        .service
        .owned_product(&business_id, &product_id)
        .await?;
    if let Some(name) = &update.name {
        update.name = Some(product_name(name)?);
    }
    Ok(Json(
        state.store().update_product(&product_id, update).await?,
    ))
}
