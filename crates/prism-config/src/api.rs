//! Direct-backend API configuration.

use serde::{Deserialize, Serialize};

/// Fixed regional base endpoints for the direct backend.
const US_BASE_URL: &str = "https://api.prism-us.dev";
const EU_BASE_URL: &str = "https://api.prism-eu.dev";

/// Default per-call timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Default retry attempt cap for transient transport failures.
const fn default_max_retries() -> u32 {
    3
}

/// Service region selecting the direct base endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Service region (`us` or `eu`).
    #[serde(default)]
    pub region: Region,

    /// Explicit base URL override. Empty means use the regional endpoint.
    #[serde(default)]
    pub base_url: String,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempt cap for transient transport failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl ApiConfig {
    /// Effective base URL: explicit override wins, else the regional endpoint.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        if self.base_url.is_empty() {
            match self.region {
                Region::Us => US_BASE_URL,
                Region::Eu => EU_BASE_URL,
            }
        } else {
            &self.base_url
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}
