//! Summary metrics over a sampled record set.

use std::collections::HashMap;

use prism_core::RequestRecord;
use prism_core::record::UNKNOWN_GROUP;
use serde::Serialize;

/// Sum and mean of one sampled metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SampleStat {
    pub sum: f64,
    pub mean: f64,
}

impl SampleStat {
    fn from_values(values: impl Iterator<Item = f64>, sample_size: u64) -> Self {
        let sum: f64 = values.sum();
        let mean = if sample_size == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / sample_size as f64;
            mean
        };
        Self { sum, mean }
    }
}

/// Frequency-distribution entry, sorted descending by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

/// Summary, cost, and error statistics over one sample.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    /// Records actually in hand.
    pub sample_size: u64,
    /// Matching-record count as reported by the service (advisory).
    pub true_total: u64,
    /// `true_total` clamped to at least the sample size; the count endpoint
    /// is known to sometimes return zero spuriously.
    pub effective_total: u64,
    /// `effective_total / sample_size`; never below 1.
    pub scale_factor: f64,
    pub cost: SampleStat,
    /// Population-level cost estimate (`cost.sum × scale_factor`).
    pub estimated_total_cost: f64,
    pub tokens: SampleStat,
    /// Population-level token estimate (`tokens.sum × scale_factor`).
    pub estimated_total_tokens: f64,
    /// Latency is a sample mean, assumed representative; never rescaled.
    pub latency: SampleStat,
    /// Responses with a 2xx status.
    pub success_count: u64,
    /// Responses with a status of 400 or above.
    pub error_count: u64,
    /// `error_count` as a percentage of the sample.
    pub error_rate_percent: f64,
    pub by_model: Vec<GroupCount>,
    pub by_provider: Vec<GroupCount>,
}

impl MetricsSummary {
    /// Aggregate `records`, extrapolating sums toward `true_total`.
    #[must_use]
    pub fn compute(records: &[RequestRecord], true_total: u64) -> Self {
        let sample_size = records.len() as u64;
        let effective_total = true_total.max(sample_size);
        let scale_factor = if sample_size == 0 {
            1.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let factor = effective_total as f64 / sample_size as f64;
            factor
        };

        let cost = SampleStat::from_values(
            records.iter().filter_map(RequestRecord::cost_usd),
            sample_size,
        );
        let tokens = SampleStat::from_values(
            records.iter().filter_map(RequestRecord::total_tokens),
            sample_size,
        );
        let latency = SampleStat::from_values(
            records.iter().filter_map(RequestRecord::latency_ms),
            sample_size,
        );

        let success_count = records
            .iter()
            .filter(|r| r.status().is_some_and(|s| (200..300).contains(&s)))
            .count() as u64;
        let error_count = records
            .iter()
            .filter(|r| r.status().is_some_and(|s| s >= 400))
            .count() as u64;
        let error_rate_percent = if sample_size == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = error_count as f64 / sample_size as f64 * 100.0;
            rate
        };

        Self {
            sample_size,
            true_total,
            effective_total,
            scale_factor,
            estimated_total_cost: cost.sum * scale_factor,
            estimated_total_tokens: tokens.sum * scale_factor,
            cost,
            tokens,
            latency,
            success_count,
            error_count,
            error_rate_percent,
            by_model: frequency(records, |r| r.model()),
            by_provider: frequency(records, |r| r.provider()),
        }
    }
}

/// Frequency distribution over a string-keyed accessor; missing values
/// bucket under `"unknown"`. Sorted descending by count, then by key for a
/// stable order.
fn frequency<'a>(
    records: &'a [RequestRecord],
    key_of: impl Fn(&'a RequestRecord) -> Option<&'a str>,
) -> Vec<GroupCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *counts.entry(key_of(record).unwrap_or(UNKNOWN_GROUP)).or_default() += 1;
    }
    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    groups
}
