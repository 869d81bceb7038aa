//! The signed-in business's own profile and social links.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use pulse_core::entities::{Business, SocialLink};
use pulse_db::{BusinessUpdate, FeedbackStore, NewSocialLink};
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

const MAX_SOCIAL_LINKS: usize = 20;

#[derive(Debug, Serialize)]
pub struct Profile {
    pub business: Business,
    pub social_links: Vec<SocialLink>,
}

#[instrument(skip(state, headers))]
pub async fn get<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let business_id = state.business_id(&headers)?;
    let business = state
        .store()
        .get_business(&business_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("business not found: {business_id}")))?;
    let social_links = state.store().list_social_links(&business_id).await?;
    Ok(Json(Profile {
        business,
        social_links,
    }))
}

#[instrument(skip(state, headers, update))]
pub async fn update<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiJson(update): ApiJson<BusinessUpdate>,
) -> Result<Json<Business>, ApiError> {
    let business_id = state.business_id(&headers)?;
    Ok(Json(
        state
            .auth
            .update_business_profile(state.store(), &business_id, update)
            .await?,
    ))
}

/// Replace the whole list; array position becomes display order.
#[instrument(skip(state, headers, links), fields(links = links.len()))]
pub async fn replace_social_links<S: FeedbackStore + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    headers: HeaderMap,
    ApiJson(links): ApiJson<Vec<NewSocialLink>>,
) -> Result<Json<Vec<SocialLink>>, ApiError> {
    let business_id = state.business_id(&headers)?;
    if links.len() > MAX_SOCIAL_LINKS {
        return Err(ApiError::Validation(format!(
            "at most {MAX_SOCIAL_LINKS} social links are allowed"
        )));
    }
    let links = links
        .into_iter()
        .map(|link| {
            let platform = link.platform.trim().to_lowercase();
            let url = link.url.trim().to_string();
            if platform.is_empty() || url.is_empty() {
                return Err(ApiError::Validation(
                    "social links need a platform and a url".into(),
                ));
            }
            Ok(NewSocialLink { platform, url })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(
        state
            .store()
            .replace_social_links(&business_id, links)
            .await?,
    ))
}
