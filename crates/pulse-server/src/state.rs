use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use pulse_auth::{AuthError, Authenticator, bearer_token};
use pulse_config::GeneralConfig;
use pulse_core::identity::{AuthIdentity, TokenKind};
use pulse_db::{FeedbackService, FeedbackStore};

use crate::error::ApiError;

/// Shared by every handler behind an `Arc`.
pub struct ServerState<S> {
    pub service: FeedbackService<S>,
    pub auth: Authenticator,
    pub general: GeneralConfig,
}

impl<S: FeedbackStore> ServerState<S> {
    pub const fn new(store: S, auth: Authenticator, general: GeneralConfig) -> Self {
        Self {
            service: FeedbackService::new(store),
            auth,
            general,
        }
    }

    pub const fn store(&self) -> &S {
        self.service.store()
    }

    /// The bearer token of the request, if one was sent.
    fn token(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let value = value
            .to_str()
            .map_err(|_| ApiError::Unauthorized("malformed authorization header".into()))?;
        bearer_token(value)
            .map(Some)
            .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".into()))
    }

    fn require(&self, headers: &HeaderMap, kind: TokenKind) -> Result<AuthIdentity, ApiError> {
        let token = Self::token(headers)?.ok_or(AuthError::NotAuthenticated)?;
        Ok(self.auth.signer().identify_as(token, kind)?)
    }

    /// The signed-in business owner's business id.
    ///
    /// # Errors
    ///
    /// 401 without a valid token, 403 for a customer token.
    pub fn business_id(&self, headers: &HeaderMap) -> Result<String, ApiError> {
        Ok(self.require(headers, TokenKind::Business)?.subject_id)
    }

    /// The signed-in customer's user id, `None` for anonymous requests.
    ///
    /// A token that is sent must be a valid customer token.
    ///
    /// # Errors
    ///
    /// 401 for a bad token, 403 for a business token.
    pub fn optional_customer_id(&self, headers: &HeaderMap) -> Result<Option<String>, ApiError> {
        match Self::token(headers)? {
            None => Ok(None),
            Some(token) => Ok(Some(
                self.auth
                    .signer()
                    .identify_as(token, TokenKind::Customer)?
                    .subject_id,
            )),
        }
    }
}
