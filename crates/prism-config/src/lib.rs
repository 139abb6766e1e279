//! # prism-config
//!
//! Layered configuration loading for Prism using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PRISM_*` prefix, `__` as separator)
//! 2. Project-level `.prism/config.toml`
//! 3. User-level `~/.config/prism/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PRISM_API__REGION` -> `api.region`,
//! `PRISM_METRICS__DIRECT_SAMPLE_LIMIT` -> `metrics.direct_sample_limit`,
//! etc. The `__` (double underscore) separates nested config sections.

mod api;
mod error;
mod gateway;
mod general;
mod metrics;

pub use api::{ApiConfig, Region};
pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use general::GeneralConfig;
pub use metrics::MetricsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PrismConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PrismConfig {
    /// Load configuration from all sources (TOML files + environment).
    ///
    /// Does NOT call `dotenvy` — the binary loads `.env` before this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".prism/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PRISM_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("prism").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PrismConfig::default();
        assert!(!config.gateway.is_configured());
        assert_eq!(config.api.region, Region::Us);
        assert_eq!(config.metrics.direct_sample_limit, 1000);
        assert_eq!(config.metrics.gateway_sample_limit, 200);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: PrismConfig = PrismConfig::figment().extract()?;
            assert_eq!(config.general.default_limit, 20);
            assert_eq!(config.general.batch_delay_ms, 100);
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PRISM_API__REGION", "eu");
            jail.set_env("PRISM_METRICS__GATEWAY_SAMPLE_LIMIT", "500");
            let config: PrismConfig = PrismConfig::figment().extract()?;
            assert_eq!(config.api.region, Region::Eu);
            assert_eq!(config.metrics.gateway_sample_limit, 500);
            Ok(())
        });
    }

    #[test]
    fn project_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".prism")?;
            jail.create_file(
                ".prism/config.toml",
                r#"
                [gateway]
                base_url = "http://localhost:8787"

                [general]
                default_limit = 50
                "#,
            )?;
            jail.set_env("PRISM_GENERAL__DEFAULT_LIMIT", "5");
            let config: PrismConfig = PrismConfig::figment().extract()?;
            assert!(config.gateway.is_configured());
            assert_eq!(config.general.default_limit, 5);
            Ok(())
        });
    }
}
