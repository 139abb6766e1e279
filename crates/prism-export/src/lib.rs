//! # prism-export
//!
//! The paginated retrieval/export engine and its streaming sinks.
//!
//! The engine drives repeated bounded-size fetches against an
//! [`ExportSource`] until a target record count is reached or the source is
//! exhausted, writing each record to an [`ExportSink`] immediately. No
//! record is held in memory once written; batches are strictly sequential
//! with a fixed inter-batch throttle; progress is reported after every
//! batch.

mod engine;
mod error;
mod format;
mod sink;
mod source;

pub use engine::{ExportOptions, ExportOutcome, ProgressUpdate, run_export};
pub use error::ExportError;
pub use format::ExportFormat;
pub use sink::{DEFAULT_REQUEST_FIELDS, DEFAULT_SESSION_FIELDS, ExportSink};
pub use source::{ExportSource, RequestSource, SessionSource};
