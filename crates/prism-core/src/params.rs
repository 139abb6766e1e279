//! Query parameters: filter, pagination window, sort, and query hints.

use serde::{Deserialize, Serialize};

use crate::filter::FilterNode;

/// Hard per-request limit enforced by the remote service.
pub const MAX_QUERY_LIMIT: u64 = 1000;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort specification (field → direction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Default for Sort {
    /// The service's default ordering: descending creation time.
    fn default() -> Self {
        Self {
            field: String::from("created_at"),
            direction: SortDirection::Desc,
        }
    }
}

/// A complete query: filter tree plus pagination window, sort, and hints.
///
/// Serializes directly as the request body for the query endpoints. The
/// boolean hints default to conservative/false values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub filter: FilterNode,
    pub offset: u64,
    pub limit: u64,
    pub sort: Sort,
    pub is_cached: bool,
    pub include_inputs: bool,
    pub is_part_of_experiment: bool,
    pub is_scored: bool,
}

impl QueryParams {
    /// New params over `filter` with a default window and sort.
    #[must_use]
    pub fn new(filter: FilterNode) -> Self {
        Self {
            filter,
            offset: 0,
            limit: MAX_QUERY_LIMIT,
            sort: Sort::default(),
            is_cached: false,
            include_inputs: false,
            is_part_of_experiment: false,
            is_scored: false,
        }
    }

    /// Set the pagination window. `limit` is clamped to [`MAX_QUERY_LIMIT`].
    #[must_use]
    pub fn with_window(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit.min(MAX_QUERY_LIMIT);
        self
    }

    /// Set the sort specification.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }
}
