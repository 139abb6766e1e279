use prism_api::Backend;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequestGetArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(
    args: &RequestGetArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let spinner = Progress::spinner("fetching request");
    let result = ctx.client.get_request(&args.id, args.include_body).await;
    spinner.finish_clear();

    let record = result?;
    output(&record, flags.format)
}
