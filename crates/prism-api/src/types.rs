//! Wire types specific to the query contract.

use prism_core::FilterNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Externally-hosted request/response body payload.
///
/// Fetched best-effort from a signed URL; either side may be absent. A
/// failed fetch yields the empty default rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignedBody {
    #[serde(default)]
    pub request: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl SignedBody {
    /// Whether neither side is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.request.is_none() && self.response.is_none()
    }
}

/// Parameters for the remote per-user metrics endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetricsParams {
    pub filter: FilterNode,
    pub offset: u64,
    pub limit: u64,
}

impl UserMetricsParams {
    #[must_use]
    pub fn new(filter: FilterNode, limit: u64) -> Self {
        Self {
            filter,
            offset: 0,
            limit,
        }
    }
}

/// One per-user aggregate row computed remotely.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserMetricRow {
    pub user_id: String,
    #[serde(default)]
    pub cost_usd: f64,
    #[serde(default)]
    pub total_tokens: f64,
    #[serde(default)]
    pub request_count: u64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const USER_METRICS_FIXTURE: &str = r#"[
        {
            "user_id": "user-1",
            "cost_usd": 12.5,
            "total_tokens": 48000,
            "request_count": 310
        },
        {
            "user_id": "user-2",
            "request_count": 4
        }
    ]"#;

    #[test]
    fn parse_user_metric_rows() {
        let rows: Vec<UserMetricRow> = serde_json::from_str(USER_METRICS_FIXTURE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "user-1");
        assert_eq!(rows[0].request_count, 310);
        // Missing aggregates default to zero rather than failing the row.
        assert_eq!(rows[1].cost_usd, 0.0);
        assert_eq!(rows[1].total_tokens, 0.0);
    }

    #[test]
    fn signed_body_default_is_empty() {
        assert!(SignedBody::default().is_empty());
        let body: SignedBody = serde_json::from_str(r#"{"request": {"a": 1}}"#).unwrap();
        assert!(!body.is_empty());
        assert!(body.response.is_none());
    }
}
