//! The paginated fetch-and-export loop.

use std::time::{Duration, Instant};

use crate::error::ExportError;
use crate::sink::ExportSink;
use crate::source::ExportSource;

/// Knobs for one export job.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Explicit record cap; `None` exports everything matching.
    pub max_records: Option<u64>,
    /// Per-request batch size.
    pub batch_size: u64,
    /// Fixed inter-batch throttle. A rate bound, not a correctness
    /// mechanism.
    pub batch_delay: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_records: None,
            batch_size: 100,
            batch_delay: Duration::from_millis(100),
        }
    }
}

/// Progress snapshot reported after every batch.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub exported: u64,
    pub target: u64,
    pub percent: f64,
    /// Records per second since the job started.
    pub throughput: f64,
    /// Estimated seconds remaining at the current throughput.
    pub eta_secs: f64,
}

/// How an export job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The job wrote `exported` records (possibly fewer than the target if
    /// the source ran dry early).
    Completed { exported: u64 },
    /// The count call matched nothing; no page was fetched. Informational,
    /// not an error.
    NothingMatched,
}

/// Drain `source` into `sink`.
///
/// Counts the matching records, then fetches batches of
/// `min(batch_size, remaining)` at increasing offsets, writing each record
/// immediately after its (optional) enrichment. The offset advances by the
/// requested batch size, not the returned count, matching the service's
/// pagination contract. An empty page ends the job early — the service may
/// return fewer records than its count implied, and that is tolerated.
///
/// The sink is consumed: finished (terminators + flush) on success, dropped
/// (stream closed, partial output left in place) on failure.
///
/// # Errors
///
/// Returns [`ExportError`] on the first fetch or write failure; the engine
/// never retries — retry policy lives in the transport below it.
pub async fn run_export<S: ExportSource>(
    source: &S,
    mut sink: ExportSink,
    opts: &ExportOptions,
    mut on_progress: impl FnMut(&ProgressUpdate),
) -> Result<ExportOutcome, ExportError> {
    let total = source.count().await?;
    if total == 0 {
        sink.finish()?;
        return Ok(ExportOutcome::NothingMatched);
    }

    let target = opts.max_records.map_or(total, |cap| cap.min(total));
    let started = Instant::now();
    let mut exported: u64 = 0;
    let mut offset: u64 = 0;

    while exported < target {
        let requested = opts.batch_size.min(target - exported);
        let page = source.page(offset, requested).await?;
        if page.is_empty() {
            tracing::debug!(exported, target, "source exhausted before target; stopping");
            break;
        }

        for mut item in page {
            if exported >= target {
                break;
            }
            source.enrich(&mut item).await;
            sink.write_record(&serde_json::to_value(&item)?)?;
            exported += 1;
        }

        offset += requested;
        on_progress(&progress(exported, target, started.elapsed()));

        if exported < target && !opts.batch_delay.is_zero() {
            tokio::time::sleep(opts.batch_delay).await;
        }
    }

    sink.finish()?;
    Ok(ExportOutcome::Completed { exported })
}

#[allow(clippy::cast_precision_loss)]
fn progress(exported: u64, target: u64, elapsed: Duration) -> ProgressUpdate {
    let percent = if target == 0 {
        100.0
    } else {
        exported as f64 / target as f64 * 100.0
    };
    let elapsed_secs = elapsed.as_secs_f64();
    let throughput = if elapsed_secs > 0.0 {
        exported as f64 / elapsed_secs
    } else {
        0.0
    };
    let remaining = target.saturating_sub(exported);
    let eta_secs = if throughput > 0.0 {
        remaining as f64 / throughput
    } else {
        0.0
    };
    ProgressUpdate {
        exported,
        target,
        percent,
        throughput,
        eta_secs,
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use prism_api::ApiError;
    use serde_json::{Value, json};

    use super::*;
    use crate::format::ExportFormat;

    /// Scripted source: claims `claimed_count` but actually holds
    /// `records`, served in pages.
    struct MockSource {
        records: Vec<Value>,
        claimed_count: u64,
        fail_at_offset: Option<u64>,
    }

    impl MockSource {
        fn with_records(n: u64, claimed: u64) -> Self {
            Self {
                records: (0..n).map(|i| json!({"seq": i})).collect(),
                claimed_count: claimed,
                fail_at_offset: None,
            }
        }
    }

    impl crate::source::ExportSource for MockSource {
        type Item = Value;

        async fn count(&self) -> Result<u64, ApiError> {
            Ok(self.claimed_count)
        }

        async fn page(&self, offset: u64, limit: u64) -> Result<Vec<Value>, ApiError> {
            if self.fail_at_offset == Some(offset) {
                return Err(ApiError::Service("backend went away".into()));
            }
            let start = usize::try_from(offset).unwrap().min(self.records.len());
            let end = (start + usize::try_from(limit).unwrap()).min(self.records.len());
            Ok(self.records[start..end].to_vec())
        }

        async fn enrich(&self, item: &mut Value) {
            item["enriched"] = json!(true);
        }
    }

    fn jsonl_sink(path: &Path) -> ExportSink {
        let file = File::create(path).expect("create output file");
        ExportSink::open(ExportFormat::Jsonl, Box::new(file), &[]).expect("open sink")
    }

    fn no_delay() -> ExportOptions {
        ExportOptions {
            max_records: None,
            batch_size: 10,
            batch_delay: Duration::ZERO,
        }
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        let mut content = String::new();
        File::open(path)
            .expect("reopen output")
            .read_to_string(&mut content)
            .expect("read output");
        content
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid jsonl line"))
            .collect()
    }

    #[tokio::test]
    async fn exports_every_record_once_in_source_order() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        let source = MockSource::with_records(25, 25);

        let outcome = run_export(&source, jsonl_sink(&path), &no_delay(), |_| {})
            .await
            .unwrap();

        assert_eq!(outcome, ExportOutcome::Completed { exported: 25 });
        let lines = read_lines(&path);
        assert_eq!(lines.len(), 25);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line["seq"], json!(i));
            assert_eq!(line["enriched"], json!(true));
        }
    }

    #[tokio::test]
    async fn explicit_cap_bounds_the_export() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        let source = MockSource::with_records(25, 25);
        let opts = ExportOptions {
            max_records: Some(7),
            ..no_delay()
        };

        let outcome = run_export(&source, jsonl_sink(&path), &opts, |_| {})
            .await
            .unwrap();

        assert_eq!(outcome, ExportOutcome::Completed { exported: 7 });
        assert_eq!(read_lines(&path).len(), 7);
    }

    #[tokio::test]
    async fn empty_page_stops_early_without_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        // The count endpoint overstates what the source can deliver.
        let source = MockSource::with_records(12, 100);

        let outcome = run_export(&source, jsonl_sink(&path), &no_delay(), |_| {})
            .await
            .unwrap();

        assert_eq!(outcome, ExportOutcome::Completed { exported: 12 });
        assert_eq!(read_lines(&path).len(), 12);
    }

    #[tokio::test]
    async fn zero_count_reports_nothing_matched() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        let source = MockSource::with_records(0, 0);

        let outcome = run_export(&source, jsonl_sink(&path), &no_delay(), |_| {})
            .await
            .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingMatched);
        assert!(read_lines(&path).is_empty());
    }

    #[tokio::test]
    async fn fetch_error_aborts_and_leaves_partial_output() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        let mut source = MockSource::with_records(25, 25);
        source.fail_at_offset = Some(10);

        let result = run_export(&source, jsonl_sink(&path), &no_delay(), |_| {}).await;

        assert!(matches!(result, Err(ExportError::Api(_))));
        // The first batch made it to disk and stays there.
        assert_eq!(read_lines(&path).len(), 10);
    }

    #[tokio::test]
    async fn json_array_spans_batches_without_separator_glitches() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.json");
        let source = MockSource::with_records(25, 25);
        let file = File::create(&path).expect("create output");
        let sink = ExportSink::open(ExportFormat::Json, Box::new(file), &[]).expect("open sink");

        run_export(&source, sink, &no_delay(), |_| {}).await.unwrap();

        let mut content = String::new();
        File::open(&path)
            .expect("reopen")
            .read_to_string(&mut content)
            .expect("read");
        let parsed: Vec<Value> = serde_json::from_str(&content).expect("well-formed array");
        assert_eq!(parsed.len(), 25);
    }

    #[tokio::test]
    async fn progress_is_reported_after_every_batch() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("out.jsonl");
        let source = MockSource::with_records(25, 25);

        let mut updates = Vec::new();
        run_export(&source, jsonl_sink(&path), &no_delay(), |update| {
            updates.push((update.exported, update.target));
        })
        .await
        .unwrap();

        assert_eq!(updates, vec![(10, 25), (20, 25), (25, 25)]);
    }
}
