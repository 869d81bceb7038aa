use anyhow::Context;
use pulse_auth::password::hash_password_blocking;
use pulse_config::PulseConfig;
use pulse_db::demo::{self, DEMO_PASSWORD, SeedReport};
use pulse_db::{FeedbackService, FeedbackStore, StoreBackend};

/// Configuration plus the store selected from it.
pub struct AppContext {
    pub config: PulseConfig,
    pub service: FeedbackService<StoreBackend>,
}

impl AppContext {
    /// Open the configured store (in-memory when no database url is set).
    pub async fn init(config: PulseConfig) -> anyhow::Result<Self> {
        let store = StoreBackend::from_config(&config.database)
            .await
            .context("failed to open the pulse database")?;
        Ok(Self {
            config,
            service: FeedbackService::new(store),
        })
    }

    pub fn is_memory(&self) -> bool {
        self.service.store().backend_kind() == "memory"
    }

    /// Create the demo business with a freshly hashed demo password.
    pub async fn seed_demo(&self) -> anyhow::Result<SeedReport> {
        let hash = hash_password_blocking(DEMO_PASSWORD.to_string(), self.config.auth.bcrypt_cost)
            .await
            .context("failed to hash the demo password")?;
        demo::seed(&self.service, &hash)
            .await
            .context("failed to seed demo data")
    }

    /// Hand the service over to the HTTP layer.
    pub fn into_parts(self) -> (PulseConfig, StoreBackend) {
        let Self { config, service } = self;
        (config, service.into_store())
    }
}
