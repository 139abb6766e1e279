//! Grouped cost and error breakdowns.
//!
//! Both breakdowns reuse one sampling/grouping primitive with a different
//! key function and metric; each group reports its share of the summed
//! metric, sorted descending.

use std::collections::HashMap;

use prism_core::RequestRecord;
use prism_core::record::UNKNOWN_GROUP;
use serde::Serialize;

/// Grouping dimension for breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Model,
    Provider,
    /// UTC calendar day of the record's creation time.
    Day,
    User,
}

impl GroupKey {
    /// Group key of one record; missing values bucket as `"unknown"`.
    #[must_use]
    pub fn key_of(self, record: &RequestRecord) -> String {
        let key = match self {
            Self::Model => record.model().map(ToString::to_string),
            Self::Provider => record.provider().map(ToString::to_string),
            Self::Day => record.created_at().map(|dt| dt.date_naive().to_string()),
            Self::User => record.user_id().map(ToString::to_string),
        };
        key.unwrap_or_else(|| UNKNOWN_GROUP.to_string())
    }
}

/// One group's slice of a metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBreakdown {
    pub key: String,
    /// Summed metric for the group (cost in USD, or error count).
    pub value: f64,
    /// This group's share of the summed metric, as a percentage.
    pub share_percent: f64,
    /// Records in the group.
    pub count: u64,
}

/// Cost per group, descending by cost.
#[must_use]
pub fn cost_by_group(records: &[RequestRecord], key: GroupKey) -> Vec<GroupBreakdown> {
    breakdown(records, key, |record| record.cost_usd().unwrap_or(0.0))
}

/// Error count (status ≥ 400) per group, descending by errors.
#[must_use]
pub fn errors_by_group(records: &[RequestRecord], key: GroupKey) -> Vec<GroupBreakdown> {
    breakdown(records, key, |record| {
        if record.status().is_some_and(|s| s >= 400) {
            1.0
        } else {
            0.0
        }
    })
}

fn breakdown(
    records: &[RequestRecord],
    key: GroupKey,
    metric: impl Fn(&RequestRecord) -> f64,
) -> Vec<GroupBreakdown> {
    let mut sums: HashMap<String, (f64, u64)> = HashMap::new();
    for record in records {
        let entry = sums.entry(key.key_of(record)).or_default();
        entry.0 += metric(record);
        entry.1 += 1;
    }

    let total: f64 = sums.values().map(|(value, _)| value).sum();
    let mut groups: Vec<GroupBreakdown> = sums
        .into_iter()
        .map(|(key, (value, count))| GroupBreakdown {
            key,
            value,
            share_percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            count,
        })
        .collect();
    groups.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    groups
}
