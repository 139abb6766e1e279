use prism_core::{FilterTable, QueryParams};
use prism_export::{DEFAULT_SESSION_FIELDS, SessionSource};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionExportArgs;
use crate::commands::shared::export::{ExportRequest, run_export_command};
use crate::commands::shared::filter::{resolve_filter, resolve_sort};
use crate::context::AppContext;

pub async fn run(
    args: &SessionExportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = resolve_filter(&args.filter, FilterTable::Sessions)?;
    let params = QueryParams::new(filter).with_sort(resolve_sort(&args.sort));
    let source = SessionSource::new(&ctx.client, params);

    let request = ExportRequest {
        output: args.output.as_ref(),
        export_format: &args.export_format,
        all: args.all,
        limit: args.limit,
        batch_size: args.batch_size,
        fields: args.fields.as_deref(),
        default_basename: "sessions-export",
        default_fields: DEFAULT_SESSION_FIELDS,
        label: "exporting sessions",
    };
    run_export_command(&source, &request, &ctx.config.general, flags).await
}
