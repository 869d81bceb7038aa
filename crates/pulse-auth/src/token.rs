//! HS256 JWT issue and verification.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use pulse_config::AuthConfig;
use pulse_core::identity::{AuthIdentity, TokenKind};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Claims carried by every Pulse token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Business id or user id, depending on `kind`.
    pub sub: String,
    pub kind: TokenKind,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn into_identity(self) -> AuthIdentity {
        AuthIdentity {
            subject_id: self.sub,
            kind: self.kind,
            email: self.email,
        }
    }

    /// Expiry as a timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Signs and verifies tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &str, ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Build a signer from validated auth settings.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` for an empty secret or invalid TTL.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let ttl = i64::try_from(config.token_ttl_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .ok_or_else(|| {
                AuthError::Config(pulse_config::ConfigError::InvalidValue {
                    field: "auth.token_ttl_hours".into(),
                    reason: "too large".into(),
                })
            })?;
        Ok(Self::new(&config.jwt_secret, ttl))
    }

    /// Issue a token valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue(&self, subject_id: &str, kind: TokenKind, email: &str) -> Result<String, AuthError> {
        self.issue_at(subject_id, kind, email, Utc::now())
    }

    /// Issue a token as if at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue_at(
        &self,
        subject_id: &str,
        kind: TokenKind,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject_id.to_string(),
            kind,
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry.
    ///
    /// # Errors
    ///
    /// `AuthError::TokenExpired` past `exp`, `AuthError::InvalidToken` for
    /// anything else (bad signature, malformed, wrong algorithm).
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }

    /// Verify and return the caller's identity.
    ///
    /// # Errors
    ///
    /// As [`Self::verify`].
    pub fn identify(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        self.verify(token).map(Claims::into_identity)
    }

    /// Verify and require a specific token kind.
    ///
    /// # Errors
    ///
    /// As [`Self::verify`], plus `AuthError::WrongTokenKind`.
    pub fn identify_as(&self, token: &str, expected: TokenKind) -> Result<AuthIdentity, AuthError> {
        let identity = self.identify(token)?;
        if identity.kind == expected {
            Ok(identity)
        } else {
            Err(AuthError::WrongTokenKind { expected })
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
