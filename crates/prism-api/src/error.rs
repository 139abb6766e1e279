//! API error types.

use thiserror::Error;

/// Errors surfaced by the query contract.
///
/// These are values, not control flow: every call site checks them
/// explicitly, and the retrieval engine treats any of them as fatal for the
/// operation in progress.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (after retries were exhausted).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 and retries were exhausted.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response envelope carried a populated `error` field.
    #[error("service error: {0}")]
    Service(String),

    /// Failed to decode a service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The active backend does not support this operation.
    #[error("{operation} is not supported by the gateway backend")]
    Unsupported {
        /// Human-readable operation name.
        operation: &'static str,
    },
}
