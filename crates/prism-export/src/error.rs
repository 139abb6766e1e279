//! Export error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The query contract surfaced an error; fatal for the current job.
    #[error(transparent)]
    Api(#[from] prism_api::ApiError),

    /// Output stream I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Record serialization failure.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecognized output format name.
    #[error("unknown export format '{0}' (expected jsonl, json, or csv)")]
    InvalidFormat(String),
}
