//! Intermediary gateway configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Gateway base URL. Empty means direct mode.
    #[serde(default)]
    pub base_url: String,
}

impl GatewayConfig {
    /// Whether a gateway base URL has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}
