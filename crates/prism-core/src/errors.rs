//! Cross-cutting error types for Prism.
//!
//! Domain-specific errors (`ApiError`, `ExportError`, …) live in their
//! respective crates. These are the errors that can originate from core
//! parsing and validation, all of which are fatal user-input errors.

use thiserror::Error;

/// Errors raised by core parsing and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A time-range string matched neither the duration nor the ISO form.
    #[error(
        "invalid time range '{input}': expected a relative duration like '7d' or '24h' (units: h, d, w, m) or an ISO-8601 date"
    )]
    InvalidTimeRange { input: String },

    /// A raw filter tree failed to parse.
    #[error("invalid filter expression: {0}")]
    InvalidFilter(String),

    /// Data failed validation (format, constraints).
    #[error("validation error: {0}")]
    Validation(String),
}
