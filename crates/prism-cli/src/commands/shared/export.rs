//! Shared CLI plumbing for export jobs.

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use prism_config::GeneralConfig;
use prism_export::{ExportFormat, ExportOptions, ExportOutcome, ExportSink, ExportSource, run_export};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

/// Records exported when neither `--all` nor `--limit` is given.
const DEFAULT_EXPORT_CAP: u64 = 1000;

/// CLI-level knobs for one export invocation.
pub struct ExportRequest<'a> {
    pub output: Option<&'a PathBuf>,
    pub export_format: &'a str,
    pub all: bool,
    pub limit: Option<u64>,
    pub batch_size: Option<u64>,
    pub fields: Option<&'a [String]>,
    /// Default output basename, e.g. `requests-export`.
    pub default_basename: &'a str,
    /// Default CSV columns.
    pub default_fields: &'a [&'a str],
    /// Progress label.
    pub label: &'a str,
}

#[derive(Serialize)]
struct ExportResponse {
    exported: u64,
    path: String,
    format: String,
    note: Option<&'static str>,
}

/// Open the sink, drive the engine, and report the outcome.
///
/// Fatal errors abort with partial output left in place; a zero-record
/// match is informational, not an error.
pub async fn run_export_command<S: ExportSource>(
    source: &S,
    request: &ExportRequest<'_>,
    general: &GeneralConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let format: ExportFormat = request.export_format.parse()?;
    let path = request.output.cloned().unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", request.default_basename, format.extension()))
    });
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let fields: Vec<&str> = request.fields.map_or_else(
        || request.default_fields.to_vec(),
        |fields| fields.iter().map(String::as_str).collect(),
    );
    let sink = ExportSink::open(format, Box::new(file), &fields)?;

    let opts = ExportOptions {
        max_records: if request.all {
            None
        } else {
            Some(request.limit.unwrap_or(DEFAULT_EXPORT_CAP))
        },
        batch_size: request.batch_size.unwrap_or(general.default_batch_size),
        batch_delay: Duration::from_millis(general.batch_delay_ms),
    };

    let bar = Progress::bar(0, request.label);
    let result = run_export(source, sink, &opts, |update| {
        bar.set_length(update.target);
        bar.set_position(update.exported);
        bar.set_message(&format!(
            "{:.0}% · {:.1} rec/s · ETA {:.0}s",
            update.percent, update.throughput, update.eta_secs
        ));
    })
    .await;

    match result {
        Ok(ExportOutcome::Completed { exported }) => {
            bar.finish_clear();
            output(
                &ExportResponse {
                    exported,
                    path: path.display().to_string(),
                    format: format.to_string(),
                    note: None,
                },
                flags.format,
            )
        }
        Ok(ExportOutcome::NothingMatched) => {
            bar.finish_clear();
            ui::info(flags, "no records matched the filter");
            output(
                &ExportResponse {
                    exported: 0,
                    path: path.display().to_string(),
                    format: format.to_string(),
                    note: Some("nothing matched"),
                },
                flags.format,
            )
        }
        Err(error) => {
            bar.finish_err("export failed");
            Err(error.into())
        }
    }
}
