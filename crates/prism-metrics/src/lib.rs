//! # prism-metrics
//!
//! Aggregation over a bounded sample of request records.
//!
//! Aggregation never fetches the full matching set — it works from a sample
//! (the active backend's sample bound) plus the service's count of the true
//! population. Sums extrapolate by the population/sample ratio; rates and
//! averages are sample statistics assumed representative, never rescaled.

mod groupby;
mod summary;

pub use groupby::{GroupBreakdown, GroupKey, cost_by_group, errors_by_group};
pub use summary::{MetricsSummary, SampleStat};
