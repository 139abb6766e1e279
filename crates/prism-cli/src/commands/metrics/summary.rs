use prism_core::FilterTable;
use prism_metrics::MetricsSummary;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MetricsArgs;
use crate::commands::metrics::sample::fetch_sample;
use crate::commands::shared::filter::resolve_filter;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

pub async fn run(args: &MetricsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = resolve_filter(&args.filter, FilterTable::Requests)?;
    let sample = fetch_sample(filter, ctx).await?;

    if sample.records.is_empty() {
        ui::info(flags, "no requests matched the filter");
    }
    let summary = MetricsSummary::compute(&sample.records, sample.true_total);
    output(&summary, flags.format)
}
