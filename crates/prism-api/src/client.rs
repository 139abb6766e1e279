//! The query contract and backend selection.

use prism_config::PrismConfig;
use prism_core::{FilterNode, MAX_QUERY_LIMIT, QueryParams, RequestRecord, SessionRecord};

use crate::direct::DirectBackend;
use crate::error::ApiError;
use crate::gateway::GatewayBackend;
use crate::types::{SignedBody, UserMetricRow, UserMetricsParams};

/// The query contract both backends implement.
///
/// Errors are ordinary values; "unsupported in this mode" is an
/// [`ApiError::Unsupported`] return, not exceptional control flow.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Query request records. The limit is silently clamped to 1000.
    async fn query_requests(&self, params: &QueryParams) -> Result<Vec<RequestRecord>, ApiError>;

    /// Count request records matching a filter.
    async fn count_requests(&self, filter: &FilterNode) -> Result<u64, ApiError>;

    /// Fetch a single request record by id.
    async fn get_request(&self, id: &str, include_body: bool) -> Result<RequestRecord, ApiError>;

    /// Fetch an externally-hosted body payload. Best-effort: any failure
    /// yields the empty default, never an error.
    async fn fetch_signed_body(&self, url: &str) -> SignedBody;

    /// Query session records.
    async fn query_sessions(&self, params: &QueryParams) -> Result<Vec<SessionRecord>, ApiError>;

    /// Count session records matching a filter.
    async fn count_sessions(&self, filter: &FilterNode) -> Result<u64, ApiError>;

    /// Per-user aggregates computed remotely, bypassing local aggregation.
    async fn query_user_metrics(
        &self,
        params: &UserMetricsParams,
    ) -> Result<Vec<UserMetricRow>, ApiError>;

    /// The aggregation sample bound for this backend.
    fn sample_limit(&self) -> u64;
}

/// Copy of `params` with the limit clamped to the service maximum.
pub(crate) fn clamp_params(params: &QueryParams) -> QueryParams {
    let mut params = params.clone();
    params.limit = params.limit.min(MAX_QUERY_LIMIT);
    params
}

/// The configured backend, selected once at startup.
pub enum ApiClient {
    Direct(DirectBackend),
    Gateway(GatewayBackend),
}

impl ApiClient {
    /// Build the backend the configuration selects: gateway when a gateway
    /// base URL is configured, direct otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the underlying HTTP client fails to build.
    pub fn from_config(config: &PrismConfig, api_key: String) -> Result<Self, ApiError> {
        if config.gateway.is_configured() {
            Ok(Self::Gateway(GatewayBackend::new(config, api_key)?))
        } else {
            Ok(Self::Direct(DirectBackend::new(config, api_key)?))
        }
    }

    /// Short mode name for status display.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Direct(_) => "direct",
            Self::Gateway(_) => "gateway",
        }
    }
}

impl Backend for ApiClient {
    async fn query_requests(&self, params: &QueryParams) -> Result<Vec<RequestRecord>, ApiError> {
        match self {
            Self::Direct(backend) => backend.query_requests(params).await,
            Self::Gateway(backend) => backend.query_requests(params).await,
        }
    }

    async fn count_requests(&self, filter: &FilterNode) -> Result<u64, ApiError> {
        match self {
            Self::Direct(backend) => backend.count_requests(filter).await,
            Self::Gateway(backend) => backend.count_requests(filter).await,
        }
    }

    async fn get_request(&self, id: &str, include_body: bool) -> Result<RequestRecord, ApiError> {
        match self {
            Self::Direct(backend) => backend.get_request(id, include_body).await,
            Self::Gateway(backend) => backend.get_request(id, include_body).await,
        }
    }

    async fn fetch_signed_body(&self, url: &str) -> SignedBody {
        match self {
            Self::Direct(backend) => backend.fetch_signed_body(url).await,
            Self::Gateway(backend) => backend.fetch_signed_body(url).await,
        }
    }

    async fn query_sessions(&self, params: &QueryParams) -> Result<Vec<SessionRecord>, ApiError> {
        match self {
            Self::Direct(backend) => backend.query_sessions(params).await,
            Self::Gateway(backend) => backend.query_sessions(params).await,
        }
    }

    async fn count_sessions(&self, filter: &FilterNode) -> Result<u64, ApiError> {
        match self {
            Self::Direct(backend) => backend.count_sessions(filter).await,
            Self::Gateway(backend) => backend.count_sessions(filter).await,
        }
    }

    async fn query_user_metrics(
        &self,
        params: &UserMetricsParams,
    ) -> Result<Vec<UserMetricRow>, ApiError> {
        match self {
            Self::Direct(backend) => backend.query_user_metrics(params).await,
            Self::Gateway(backend) => backend.query_user_metrics(params).await,
        }
    }

    fn sample_limit(&self) -> u64 {
        match self {
            Self::Direct(backend) => backend.sample_limit(),
            Self::Gateway(backend) => backend.sample_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use prism_core::FilterNode;

    use super::*;

    #[test]
    fn clamp_caps_limit_at_service_maximum() {
        let params = QueryParams::new(FilterNode::All).with_window(0, 10);
        assert_eq!(clamp_params(&params).limit, 10);

        let mut params = QueryParams::new(FilterNode::All);
        params.limit = 9999;
        assert_eq!(clamp_params(&params).limit, MAX_QUERY_LIMIT);
    }

    #[test]
    fn gateway_config_selects_gateway_backend() {
        let mut config = PrismConfig::default();
        let client = ApiClient::from_config(&config, "pk-test".into()).unwrap();
        assert_eq!(client.mode(), "direct");

        config.gateway.base_url = "http://localhost:8787".into();
        let client = ApiClient::from_config(&config, "pk-test".into()).unwrap();
        assert_eq!(client.mode(), "gateway");
    }

    #[test]
    fn sample_limit_follows_backend_mode() {
        let mut config = PrismConfig::default();
        let direct = ApiClient::from_config(&config, "pk-test".into()).unwrap();
        assert_eq!(direct.sample_limit(), 1000);

        config.gateway.base_url = "http://localhost:8787".into();
        let gateway = ApiClient::from_config(&config, "pk-test".into()).unwrap();
        assert_eq!(gateway.sample_limit(), 200);
    }
}
