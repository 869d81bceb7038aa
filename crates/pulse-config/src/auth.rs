//! Token signing and password hashing configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One week.
const fn default_token_ttl_hours() -> u64 {
    168
}

const fn default_bcrypt_cost() -> u32 {
    12
}

/// bcrypt's accepted cost range.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret for HS256 tokens.
    #[serde(default)]
    pub jwt_secret: String,

    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,

    /// bcrypt work factor.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    /// Check that tokens can be issued with these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the secret is empty and
    /// [`ConfigError::InvalidValue`] for a zero TTL or an out-of-range cost.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_hours".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "auth.bcrypt_cost".into(),
                reason: format!(
                    "must be between {} and {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            });
        }
        Ok(())
    }
}
