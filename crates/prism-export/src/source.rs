//! Engine-facing record sources.
//!
//! [`ExportSource`] is the narrow contract the pagination engine drives:
//! a count, a page fetch, and an optional per-record enrichment step.
//! [`RequestSource`] and [`SessionSource`] adapt a backend plus a base
//! query to that contract.

use prism_api::{ApiError, Backend};
use prism_core::{QueryParams, RequestRecord, SessionRecord};
use serde::Serialize;

/// A paginated record source the export engine can drain.
#[allow(async_fn_in_trait)]
pub trait ExportSource {
    /// The record type this source yields.
    type Item: Serialize;

    /// How many records match the source's filter.
    async fn count(&self) -> Result<u64, ApiError>;

    /// Fetch one page at `offset` of at most `limit` records.
    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, ApiError>;

    /// Best-effort per-record enrichment before write. Must not fail.
    async fn enrich(&self, item: &mut Self::Item);
}

/// Request records behind a filter, optionally enriched with body payloads.
pub struct RequestSource<'a, B> {
    backend: &'a B,
    params: QueryParams,
    include_body: bool,
}

impl<'a, B: Backend> RequestSource<'a, B> {
    #[must_use]
    pub const fn new(backend: &'a B, params: QueryParams, include_body: bool) -> Self {
        Self {
            backend,
            params,
            include_body,
        }
    }
}

impl<B: Backend> ExportSource for RequestSource<'_, B> {
    type Item = RequestRecord;

    async fn count(&self) -> Result<u64, ApiError> {
        self.backend.count_requests(&self.params.filter).await
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<RequestRecord>, ApiError> {
        let params = self.params.clone().with_window(offset, limit);
        self.backend.query_requests(&params).await
    }

    async fn enrich(&self, item: &mut RequestRecord) {
        if !self.include_body {
            return;
        }
        let Some(url) = item.signed_body_url().map(ToString::to_string) else {
            return;
        };
        // Failure degrades to a record without the body payload.
        let body = self.backend.fetch_signed_body(&url).await;
        item.attach_body(body.request, body.response);
    }
}

/// Session records behind a filter. Sessions have no body enrichment.
pub struct SessionSource<'a, B> {
    backend: &'a B,
    params: QueryParams,
}

impl<'a, B: Backend> SessionSource<'a, B> {
    #[must_use]
    pub const fn new(backend: &'a B, params: QueryParams) -> Self {
        Self { backend, params }
    }
}

impl<B: Backend> ExportSource for SessionSource<'_, B> {
    type Item = SessionRecord;

    async fn count(&self) -> Result<u64, ApiError> {
        self.backend.count_sessions(&self.params.filter).await
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<SessionRecord>, ApiError> {
        let params = self.params.clone().with_window(offset, limit);
        self.backend.query_sessions(&params).await
    }

    async fn enrich(&self, _item: &mut SessionRecord) {}
}
