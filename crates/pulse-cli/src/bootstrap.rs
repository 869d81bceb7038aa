use anyhow::Context;
use pulse_config::PulseConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<PulseConfig> {
    let config = PulseConfig::load_with_dotenv().context("failed to load pulse configuration")?;
    crate::context::warn_unconfigured(&config);
    Ok(config)
}
