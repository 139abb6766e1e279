//! Convenience filter and sort flags shared across query commands.

use std::path::PathBuf;

use clap::Args;

/// Convenience conditions compiled into a filter tree, plus an optional raw
/// tree that is always AND-combined with them.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Exact model name
    #[arg(long)]
    pub model: Option<String>,

    /// Model name substring
    #[arg(long)]
    pub model_contains: Option<String>,

    /// Exact HTTP status
    #[arg(long)]
    pub status: Option<u16>,

    /// Exact user id
    #[arg(long = "user")]
    pub user: Option<String>,

    /// Exact provider name
    #[arg(long)]
    pub provider: Option<String>,

    /// Window start: a relative duration (7d, 24h) or an ISO date
    #[arg(long)]
    pub since: Option<String>,

    /// Window end: a relative duration (7d, 24h) or an ISO date
    #[arg(long)]
    pub until: Option<String>,

    /// Minimum cost in USD
    #[arg(long)]
    pub min_cost: Option<f64>,

    /// Maximum cost in USD
    #[arg(long)]
    pub max_cost: Option<f64>,

    /// Minimum latency in milliseconds
    #[arg(long)]
    pub min_latency: Option<u64>,

    /// Maximum latency in milliseconds
    #[arg(long)]
    pub max_latency: Option<u64>,

    /// Property equality, KEY=VALUE (repeatable)
    #[arg(long = "property", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Only cached responses
    #[arg(long)]
    pub cached: bool,

    /// Free-text search over request and response bodies
    #[arg(long)]
    pub search: Option<String>,

    /// Request body substring
    #[arg(long)]
    pub request_contains: Option<String>,

    /// Response body substring
    #[arg(long)]
    pub response_contains: Option<String>,

    /// Raw filter tree as a JSON literal, AND-combined with the flags above
    #[arg(long)]
    pub filter: Option<String>,

    /// Raw filter tree read from a file
    #[arg(long, conflicts_with = "filter")]
    pub filter_file: Option<PathBuf>,
}

/// Sort flags.
#[derive(Clone, Debug, Default, Args)]
pub struct SortArgs {
    /// Sort field (default created_at)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort ascending (default is descending)
    #[arg(long)]
    pub asc: bool,
}
