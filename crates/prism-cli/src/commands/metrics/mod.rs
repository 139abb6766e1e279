mod cost;
mod errors;
mod sample;
mod summary;
mod users;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MetricsCommands;
use crate::context::AppContext;

/// Handle `prism metrics <subcommand>`.
pub async fn handle(
    action: &MetricsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MetricsCommands::Summary(args) => summary::run(args, ctx, flags).await,
        MetricsCommands::Cost(args) => cost::run(args, ctx, flags).await,
        MetricsCommands::Errors(args) => errors::run(args, ctx, flags).await,
        MetricsCommands::Users(args) => users::run(args, ctx, flags).await,
    }
}
