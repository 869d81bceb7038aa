//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_seed_demo_data() -> bool {
    true
}

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

const fn default_trend_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Seed the demo business into the in-memory store on startup.
    /// Ignored for SQL backends.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,

    /// Default result limit for list endpoints.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Window for dashboard trend charts, in days.
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
            default_limit: default_limit(),
            trend_days: default_trend_days(),
        }
    }
}
