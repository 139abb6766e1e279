use anyhow::Context;

/// Load `.env` (if present) and the layered configuration.
pub fn load_config() -> anyhow::Result<prism_config::PrismConfig> {
    dotenvy::dotenv().ok();
    let config = prism_config::PrismConfig::load().context("failed to load configuration")?;
    tracing::debug!(
        region = ?config.api.region,
        gateway = config.gateway.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}
