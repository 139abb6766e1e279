use prism_api::Backend;
use prism_core::{FilterTable, QueryParams, RequestRecord};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequestListArgs;
use crate::commands::shared::filter::{resolve_filter, resolve_sort};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

#[derive(Serialize)]
struct RequestListResponse {
    requests: Vec<RequestRecord>,
}

pub async fn run(
    args: &RequestListArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = resolve_filter(&args.filter, FilterTable::Requests)?;
    let limit = args
        .limit
        .unwrap_or(u64::from(ctx.config.general.default_limit));
    let params = QueryParams::new(filter)
        .with_window(args.offset, limit)
        .with_sort(resolve_sort(&args.sort));

    let spinner = Progress::spinner("querying requests");
    let result = ctx.client.query_requests(&params).await;
    spinner.finish_clear();

    let requests = result?;
    if requests.is_empty() {
        ui::info(flags, "no requests matched the filter");
    }
    output(&RequestListResponse { requests }, flags.format)
}
