use prism_api::{Backend, UserMetricsParams};
use prism_core::FilterTable;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserMetricsArgs;
use crate::commands::shared::filter::resolve_filter;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

pub async fn run(
    args: &UserMetricsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = resolve_filter(&args.filter, FilterTable::Requests)?;
    let limit = args
        .limit
        .unwrap_or(u64::from(ctx.config.general.default_limit));
    let params = UserMetricsParams::new(filter, limit);

    let spinner = Progress::spinner("querying user metrics");
    let result = ctx.client.query_user_metrics(&params).await;
    spinner.finish_clear();

    let users = result?;
    if users.is_empty() {
        ui::info(flags, "no user activity matched the filter");
    }
    output(&users, flags.format)
}
