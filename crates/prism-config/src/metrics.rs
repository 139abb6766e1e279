//! Aggregation sampling configuration.
//!
//! The aggregation sample bounds are policy, not discovered invariants, so
//! they are configurable rather than hardcoded. The defaults preserve the
//! observed direct/gateway pair.

use serde::{Deserialize, Serialize};

/// Default aggregation sample bound in direct mode.
const fn default_direct_sample_limit() -> u64 {
    1000
}

/// Default aggregation sample bound in gateway mode.
const fn default_gateway_sample_limit() -> u64 {
    200
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    /// Max records sampled for aggregation against the direct backend.
    #[serde(default = "default_direct_sample_limit")]
    pub direct_sample_limit: u64,

    /// Max records sampled for aggregation through the gateway.
    #[serde(default = "default_gateway_sample_limit")]
    pub gateway_sample_limit: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            direct_sample_limit: default_direct_sample_limit(),
            gateway_sample_limit: default_gateway_sample_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_observed_pair() {
        let config = MetricsConfig::default();
        assert_eq!(config.direct_sample_limit, 1000);
        assert_eq!(config.gateway_sample_limit, 200);
    }
}
