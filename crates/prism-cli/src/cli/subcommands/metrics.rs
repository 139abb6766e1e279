use clap::{Args, Subcommand, ValueEnum};

use super::filter::FilterArgs;

/// Metrics commands. All but `users` aggregate locally over a bounded
/// sample; `users` asks the service for per-user aggregates directly.
#[derive(Clone, Debug, Subcommand)]
pub enum MetricsCommands {
    /// Summary statistics (cost, tokens, latency, error rate).
    Summary(MetricsArgs),
    /// Cost breakdown by group.
    Cost(GroupedMetricsArgs),
    /// Error breakdown by group.
    Errors(GroupedMetricsArgs),
    /// Per-user aggregates computed by the service.
    Users(UserMetricsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Clone, Debug, Args)]
pub struct GroupedMetricsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Grouping dimension
    #[arg(long = "group-by", default_value = "model")]
    pub group_by: GroupByArg,
}

#[derive(Clone, Debug, Args)]
pub struct UserMetricsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Max users to return
    #[arg(short, long)]
    pub limit: Option<u64>,
}

/// Grouping dimension for cost/error breakdowns.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum GroupByArg {
    Model,
    Provider,
    Day,
    User,
}

impl From<GroupByArg> for prism_metrics::GroupKey {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Model => Self::Model,
            GroupByArg::Provider => Self::Provider,
            GroupByArg::Day => Self::Day,
            GroupByArg::User => Self::User,
        }
    }
}
