//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit for list commands.
const fn default_limit() -> u32 {
    20
}

/// Default per-request batch size for exports.
const fn default_batch_size() -> u64 {
    100
}

/// Fixed inter-batch delay for exports, in milliseconds.
const fn default_batch_delay_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Per-request batch size for export pagination.
    #[serde(default = "default_batch_size")]
    pub default_batch_size: u64,

    /// Inter-batch throttle delay in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.default_batch_size, 100);
        assert_eq!(config.batch_delay_ms, 100);
    }
}
