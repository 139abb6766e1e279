use prism_api::Backend;
use prism_core::{FilterTable, QueryParams, SessionRecord};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionListArgs;
use crate::commands::shared::filter::{resolve_filter, resolve_sort};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

#[derive(Serialize)]
struct SessionListResponse {
    sessions: Vec<SessionRecord>,
}

pub async fn run(
    args: &SessionListArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = resolve_filter(&args.filter, FilterTable::Sessions)?;
    let limit = args
        .limit
        .unwrap_or(u64::from(ctx.config.general.default_limit));
    let params = QueryParams::new(filter)
        .with_window(args.offset, limit)
        .with_sort(resolve_sort(&args.sort));

    let spinner = Progress::spinner("querying sessions");
    let result = ctx.client.query_sessions(&params).await;
    spinner.finish_clear();

    let sessions = result?;
    if sessions.is_empty() {
        ui::info(flags, "no sessions matched the filter");
    }
    output(&SessionListResponse { sessions }, flags.format)
}
