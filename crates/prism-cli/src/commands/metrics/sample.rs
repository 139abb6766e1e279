//! Sample retrieval shared by the local aggregation commands.

use prism_api::{ApiError, Backend};
use prism_core::{FilterNode, QueryParams, RequestRecord};

use crate::context::AppContext;
use crate::progress::Progress;

/// A bounded sample plus the service's (advisory) count of the true
/// population.
pub struct Sample {
    pub records: Vec<RequestRecord>,
    pub true_total: u64,
}

/// Count the matching population, then fetch at most the active backend's
/// sample bound. Both calls are fatal on failure.
pub async fn fetch_sample(filter: FilterNode, ctx: &AppContext) -> anyhow::Result<Sample> {
    let spinner = Progress::spinner("sampling requests");
    let result = async {
        let true_total = ctx.client.count_requests(&filter).await?;
        let params = QueryParams::new(filter).with_window(0, ctx.client.sample_limit());
        let records = ctx.client.query_requests(&params).await?;
        Ok::<_, ApiError>(Sample {
            records,
            true_total,
        })
    }
    .await;
    spinner.finish_clear();
    Ok(result?)
}
