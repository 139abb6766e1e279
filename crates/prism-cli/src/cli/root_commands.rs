use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, MetricsCommands, RequestCommands, SessionCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Credential management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Request log records.
    Requests {
        #[command(subcommand)]
        action: RequestCommands,
    },
    /// Session records.
    Sessions {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Aggregated metrics.
    Metrics {
        #[command(subcommand)]
        action: MetricsCommands,
    },
}
