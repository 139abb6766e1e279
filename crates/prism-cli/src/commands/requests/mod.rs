mod export;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequestCommands;
use crate::context::AppContext;

/// Handle `prism requests <subcommand>`.
pub async fn handle(
    action: &RequestCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RequestCommands::List(args) => list::run(args, ctx, flags).await,
        RequestCommands::Get(args) => get::run(args, ctx, flags).await,
        RequestCommands::Export(args) => export::run(args, ctx, flags).await,
    }
}
