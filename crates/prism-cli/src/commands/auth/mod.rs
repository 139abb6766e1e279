mod login;
mod logout;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `prism auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &prism_config::PrismConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::run(args, flags),
        AuthCommands::Logout => logout::run(flags),
        AuthCommands::Status => status::run(flags, config),
    }
}
