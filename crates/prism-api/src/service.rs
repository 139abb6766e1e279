//! Shared HTTP plumbing for both backends.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::parse_envelope;
use crate::error::ApiError;
use crate::transport::send_with_retry;
use crate::types::SignedBody;

/// Bearer-authenticated JSON transport against one base URL.
pub(crate) struct ServiceHttp {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_retries: u32,
}

impl ServiceHttp {
    pub(crate) fn new(
        base_url: &str,
        api_key: String,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            max_retries,
        })
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let request = self
            .http
            .post(format!("{}{path}", self.base_url))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            )
            .json(body);
        let resp = send_with_retry(request, self.max_retries).await?;
        let value: Value = resp.json().await?;
        parse_envelope(value)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, ApiError> {
        let request = self
            .http
            .get(format!("{}{path_and_query}", self.base_url))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            );
        let resp = send_with_retry(request, self.max_retries).await?;
        let value: Value = resp.json().await?;
        parse_envelope(value)
    }

    /// Fetch a signed body payload. The URL is absolute and pre-authorized,
    /// so no bearer header is attached. Never fails: network errors,
    /// non-success statuses, and parse errors all degrade to the empty
    /// default.
    pub(crate) async fn fetch_signed_body(&self, url: &str) -> SignedBody {
        match self.http.get(url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.json::<SignedBody>().await {
                Ok(body) => body,
                Err(error) => {
                    tracing::debug!(%error, "signed body parse failed; skipping enrichment");
                    SignedBody::default()
                }
            },
            Ok(resp) => {
                tracing::debug!(
                    status = resp.status().as_u16(),
                    "signed body fetch returned non-success; skipping enrichment"
                );
                SignedBody::default()
            }
            Err(error) => {
                tracing::debug!(%error, "signed body fetch failed; skipping enrichment");
                SignedBody::default()
            }
        }
    }
}

/// Request body for the count endpoints.
#[derive(Serialize)]
pub(crate) struct CountBody<'a> {
    pub(crate) filter: &'a prism_core::FilterNode,
}
