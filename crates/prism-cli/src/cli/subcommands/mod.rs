mod auth;
mod filter;
mod metrics;
mod requests;
mod sessions;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use filter::{FilterArgs, SortArgs};
pub use metrics::{GroupByArg, GroupedMetricsArgs, MetricsArgs, MetricsCommands, UserMetricsArgs};
pub use requests::{RequestCommands, RequestExportArgs, RequestGetArgs, RequestListArgs};
pub use sessions::{SessionCommands, SessionExportArgs, SessionListArgs};
