//! Direct backend against a regional service endpoint.

use prism_config::PrismConfig;
use prism_core::{FilterNode, QueryParams, RequestRecord, SessionRecord};

use crate::client::{Backend, clamp_params};
use crate::error::ApiError;
use crate::service::{CountBody, ServiceHttp};
use crate::types::{SignedBody, UserMetricRow, UserMetricsParams};

/// Talks straight to the regional analytics endpoint.
pub struct DirectBackend {
    service: ServiceHttp,
    sample_limit: u64,
}

impl DirectBackend {
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client fails to build.
    pub fn new(config: &PrismConfig, api_key: String) -> Result<Self, ApiError> {
        let service = ServiceHttp::new(
            config.api.effective_base_url(),
            api_key,
            config.api.timeout_secs,
            config.api.max_retries,
        )?;
        Ok(Self {
            service,
            sample_limit: config.metrics.direct_sample_limit,
        })
    }
}

impl Backend for DirectBackend {
    async fn query_requests(&self, params: &QueryParams) -> Result<Vec<RequestRecord>, ApiError> {
        self.service
            .post_json("/v1/request/query", &clamp_params(params))
            .await
    }

    async fn count_requests(&self, filter: &FilterNode) -> Result<u64, ApiError> {
        self.service
            .post_json("/v1/request/count", &CountBody { filter })
            .await
    }

    async fn get_request(&self, id: &str, include_body: bool) -> Result<RequestRecord, ApiError> {
        let path = format!(
            "/v1/request/{}?includeBody={include_body}",
            urlencoding::encode(id)
        );
        self.service.get_json(&path).await
    }

    async fn fetch_signed_body(&self, url: &str) -> SignedBody {
        self.service.fetch_signed_body(url).await
    }

    async fn query_sessions(&self, params: &QueryParams) -> Result<Vec<SessionRecord>, ApiError> {
        self.service
            .post_json("/v1/session/query", &clamp_params(params))
            .await
    }

    async fn count_sessions(&self, filter: &FilterNode) -> Result<u64, ApiError> {
        self.service
            .post_json("/v1/session/count", &CountBody { filter })
            .await
    }

    async fn query_user_metrics(
        &self,
        params: &UserMetricsParams,
    ) -> Result<Vec<UserMetricRow>, ApiError> {
        self.service.post_json("/v1/user/metrics/query", params).await
    }

    fn sample_limit(&self) -> u64 {
        self.sample_limit
    }
}
