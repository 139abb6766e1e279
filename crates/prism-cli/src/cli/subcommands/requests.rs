use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::filter::{FilterArgs, SortArgs};

/// Request log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RequestCommands {
    /// List matching request records.
    List(RequestListArgs),
    /// Fetch a single request by id.
    Get(RequestGetArgs),
    /// Export matching requests to a file.
    Export(RequestExportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RequestListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Max results to return
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Result offset for paging
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

#[derive(Clone, Debug, Args)]
pub struct RequestGetArgs {
    /// Request id
    pub id: String,

    /// Include the request/response body payload
    #[arg(long)]
    pub include_body: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RequestExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Output file path (default requests-export.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: jsonl, json, csv
    #[arg(long = "export-format", default_value = "jsonl")]
    pub export_format: String,

    /// Export everything matching instead of the default cap
    #[arg(long)]
    pub all: bool,

    /// Max records to export (default 1000)
    #[arg(short, long, conflicts_with = "all")]
    pub limit: Option<u64>,

    /// Records per request batch
    #[arg(long)]
    pub batch_size: Option<u64>,

    /// Enrich each record with its body payload before writing
    #[arg(long)]
    pub include_body: bool,

    /// CSV columns, comma-separated (default: the standard request fields)
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,
}
