//! Registration, login, and profile flows on top of a [`FeedbackStore`].

use pulse_config::AuthConfig;
use pulse_core::entities::Business;
use pulse_core::enums::UserRole;
use pulse_core::identity::{AuthIdentity, TokenKind};
use pulse_core::responses::AuthResponse;
use pulse_db::{BusinessUpdate, FeedbackStore, NewBusiness, NewUser};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::password::{hash_password_blocking, verify_password_blocking};
use crate::token::TokenSigner;
use crate::validate::{
    slugify, validate_business_name, validate_email, validate_hex_color, validate_password,
    validate_slug,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterBusiness {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Derived from `name` when absent.
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterCustomer {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Token signer plus hashing cost; the store is passed per call.
#[derive(Clone)]
pub struct Authenticator {
    signer: TokenSigner,
    bcrypt_cost: u32,
}

impl Authenticator {
    #[must_use]
    pub const fn new(signer: TokenSigner, bcrypt_cost: u32) -> Self {
        Self {
            signer,
            bcrypt_cost,
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Config` when the auth section is unusable.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self::new(TokenSigner::from_config(config)?, config.bcrypt_cost))
    }

    #[must_use]
    pub const fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    #[must_use]
    pub const fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Hash a password with the configured cost on the blocking pool.
    ///
    /// # Errors
    ///
    /// `AuthError::Hashing` if bcrypt fails.
    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash_password_blocking(password.to_string(), self.bcrypt_cost).await
    }

    /// Create a business account and sign its owner in.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` for bad input, `AuthError::Conflict` when the
    /// email or slug is taken.
    pub async fn register_business<S: FeedbackStore>(
        &self,
        store: &S,
        input: RegisterBusiness,
    ) -> Result<AuthResponse, AuthError> {
        let name = validate_business_name(&input.name)?;
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;
        let slug = match input.slug {
            Some(slug) => slug.trim().to_string(),
            None => slugify(&name),
        };
        validate_slug(&slug)?;

        if store.find_business_by_email(&email).await?.is_some() {
            return Err(AuthError::Conflict("email already registered".into()));
        }
        if store.find_business_by_slug(&slug).await?.is_some() {
            return Err(AuthError::Conflict(format!("slug '{slug}' is taken")));
        }

        let password_hash = self.hash(&input.password).await?;
        let business = store
            .create_business(NewBusiness {
                name,
                email,
                password_hash,
                slug,
            })
            .await
            .map_err(conflict_from_db)?;
        tracing::info!(business = %business.id, slug = %business.slug, "business registered");

        let token = self
            .signer
            .issue(&business.id, TokenKind::Business, &business.email)?;
        Ok(AuthResponse {
            token,
            business: Some(business),
            user: None,
        })
    }

    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` for an unknown email or wrong password.
    pub async fn authenticate_business<S: FeedbackStore>(
        &self,
        store: &S,
        credentials: Credentials,
    ) -> Result<AuthResponse, AuthError> {
        let Some(business) = store
            .find_business_by_email(credentials.email.trim())
            .await?
        else {
            tracing::warn!("business login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password_blocking(credentials.password, business.password_hash.clone()).await? {
            tracing::warn!(business = %business.id, "business login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .signer
            .issue(&business.id, TokenKind::Business, &business.email)?;
        tracing::debug!(business = %business.id, "business logged in");
        Ok(AuthResponse {
            token,
            business: Some(business),
            user: None,
        })
    }

    /// Validate and apply a profile edit. Blank names, malformed slugs or
    /// colors, and slugs owned by another business are rejected.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation`, `AuthError::Conflict`, or a store error.
    pub async fn update_business_profile<S: FeedbackStore>(
        &self,
        store: &S,
        business_id: &str,
        mut update: BusinessUpdate,
    ) -> Result<Business, AuthError> {
        if let Some(name) = &update.name {
            update.name = Some(validate_business_name(name)?);
        }
        if let Some(slug) = &update.slug {
            let slug = slug.trim().to_string();
            validate_slug(&slug)?;
            if let Some(other) = store.find_business_by_slug(&slug).await? {
                if other.id != business_id {
                    return Err(AuthError::Conflict(format!("slug '{slug}' is taken")));
                }
            }
            update.slug = Some(slug);
        }
        if let Some(Some(color)) = &update.brand_color {
            validate_hex_color(color)?;
        }

        let business = store
            .update_business(business_id, update)
            .await
            .map_err(conflict_from_db)?;
        tracing::debug!(business = %business.id, "profile updated");
        Ok(business)
    }

    /// Create a customer account and sign it in.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` for bad input, `AuthError::Conflict` when the
    /// email is taken.
    pub async fn register_customer<S: FeedbackStore>(
        &self,
        store: &S,
        input: RegisterCustomer,
    ) -> Result<AuthResponse, AuthError> {
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;
        if store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::Conflict("email already registered".into()));
        }

        let password_hash = self.hash(&input.password).await?;
        let user = store
            .create_user(NewUser {
                email,
                name: input
                    .name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
                password_hash,
                role: UserRole::Customer,
            })
            .await
            .map_err(conflict_from_db)?;
        tracing::info!(user = %user.id, "customer registered");

        let token = self.signer.issue(&user.id, TokenKind::Customer, &user.email)?;
        Ok(AuthResponse {
            token,
            business: None,
            user: Some(user),
        })
    }

    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` for an unknown email or wrong password.
    pub async fn authenticate_customer<S: FeedbackStore>(
        &self,
        store: &S,
        credentials: Credentials,
    ) -> Result<AuthResponse, AuthError> {
        let Some(user) = store.find_user_by_email(credentials.email.trim()).await? else {
            tracing::warn!("customer login failed: unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password_blocking(credentials.password, user.password_hash.clone()).await? {
            tracing::warn!(user = %user.id, "customer login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(&user.id, TokenKind::Customer, &user.email)?;
        Ok(AuthResponse {
            token,
            business: None,
            user: Some(user),
        })
    }

    /// Verify a bearer token.
    ///
    /// # Errors
    ///
    /// As [`TokenSigner::verify`].
    pub fn identify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        self.signer.identify(token)
    }
}

/// A uniqueness race lost between the pre-check and the insert.
fn conflict_from_db(error: pulse_db::DatabaseError) -> AuthError {
    match error {
        pulse_db::DatabaseError::Conflict(msg) => AuthError::Conflict(msg),
        other => AuthError::Database(other),
    }
}
