use prism_core::FilterTable;
use prism_metrics::cost_by_group;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GroupedMetricsArgs;
use crate::commands::metrics::sample::fetch_sample;
use crate::commands::shared::filter::resolve_filter;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

pub async fn run(
    args: &GroupedMetricsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = resolve_filter(&args.filter, FilterTable::Requests)?;
    let sample = fetch_sample(filter, ctx).await?;

    if sample.records.is_empty() {
        ui::info(flags, "no requests matched the filter");
    }
    let groups = cost_by_group(&sample.records, args.group_by.into());
    output(&groups, flags.format)
}
