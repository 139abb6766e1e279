mod export;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::AppContext;

/// Handle `prism sessions <subcommand>`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::List(args) => list::run(args, ctx, flags).await,
        SessionCommands::Export(args) => export::run(args, ctx, flags).await,
    }
}
