use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::filter::{FilterArgs, SortArgs};

/// Session commands. Unsupported in gateway mode; the backend reports that
/// as an ordinary error.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// List matching session records.
    List(SessionListArgs),
    /// Export matching sessions to a file.
    Export(SessionExportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SessionListArgs {
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
pub struct SessionExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Output file path (default sessions-export.<ext>)
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

    /// CSV columns, comma-separated (default: the standard session fields)
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,
}
