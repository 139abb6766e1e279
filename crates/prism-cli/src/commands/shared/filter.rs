//! Resolution of CLI filter/sort flags into core query types.

use anyhow::Context;
use chrono::Utc;
use prism_core::{
    FilterConditions, FilterNode, FilterTable, Sort, SortDirection, combine_filters,
    parse_time_range,
};

use crate::cli::subcommands::{FilterArgs, SortArgs};

/// Compile convenience flags plus the optional raw tree into one filter.
///
/// The raw tree (from `--filter` or `--filter-file`) is AND-combined with
/// the flag-derived tree — it never replaces it. Malformed JSON, an
/// unreadable file, or a bad date string is a fatal user error.
pub fn resolve_filter(args: &FilterArgs, table: FilterTable) -> anyhow::Result<FilterNode> {
    let now = Utc::now();

    let mut conditions = FilterConditions {
        model: args.model.clone(),
        model_contains: args.model_contains.clone(),
        status: args.status,
        user_id: args.user.clone(),
        provider: args.provider.clone(),
        min_cost: args.min_cost,
        max_cost: args.max_cost,
        min_latency: args.min_latency,
        max_latency: args.max_latency,
        search: args.search.clone(),
        request_contains: args.request_contains.clone(),
        response_contains: args.response_contains.clone(),
        ..FilterConditions::default()
    };
    if let Some(since) = &args.since {
        conditions.start_date = Some(parse_time_range(since, now)?);
    }
    if let Some(until) = &args.until {
        conditions.end_date = Some(parse_time_range(until, now)?);
    }
    for property in &args.properties {
        let (key, value) = property.split_once('=').with_context(|| {
            format!("invalid --property '{property}': expected KEY=VALUE")
        })?;
        conditions
            .properties
            .push((key.to_string(), value.to_string()));
    }
    if args.cached {
        conditions.cached = Some(true);
    }

    let derived = conditions.build(table);
    let user_tree = match (&args.filter, &args.filter_file) {
        (Some(json), _) => Some(FilterNode::parse(json)?),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read filter file {}", path.display()))?;
            Some(FilterNode::parse(&content)?)
        }
        (None, None) => None,
    };

    Ok(combine_filters(user_tree, derived))
}

/// Sort flags into a sort spec; defaults to `created_at` descending.
#[must_use]
pub fn resolve_sort(args: &SortArgs) -> Sort {
    let mut sort = Sort::default();
    if let Some(field) = &args.sort {
        sort.field.clone_from(field);
    }
    if args.asc {
        sort.direction = SortDirection::Asc;
    }
    sort
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_flags_resolve_to_the_identity_filter() {
        let filter = resolve_filter(&FilterArgs::default(), FilterTable::Requests).unwrap();
        assert_eq!(filter, FilterNode::All);
    }

    #[test]
    fn raw_filter_is_and_combined_with_flags() {
        let args = FilterArgs {
            model: Some("gpt-4o".into()),
            filter: Some(r#"{"request_logs": {"status": {"gte": 400}}}"#.into()),
            ..FilterArgs::default()
        };
        let filter = resolve_filter(&args, FilterTable::Requests).unwrap();
        let FilterNode::Branch { left, right, .. } = filter else {
            panic!("expected the raw tree to AND with the derived tree");
        };
        // User tree on the left, flag-derived tree on the right.
        assert!(matches!(&*left, FilterNode::Leaf { field, .. } if field == "status"));
        assert!(matches!(&*right, FilterNode::Leaf { field, .. } if field == "model"));
    }

    #[test]
    fn malformed_raw_filter_is_fatal() {
        let args = FilterArgs {
            filter: Some("{broken".into()),
            ..FilterArgs::default()
        };
        let err = resolve_filter(&args, FilterTable::Requests).unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[test]
    fn malformed_property_is_fatal() {
        let args = FilterArgs {
            properties: vec!["no-equals-sign".into()],
            ..FilterArgs::default()
        };
        let err = resolve_filter(&args, FilterTable::Requests).unwrap_err();
        assert!(err.to_string().contains("KEY=VALUE"));
    }

    #[test]
    fn bad_date_names_accepted_formats() {
        let args = FilterArgs {
            since: Some("fortnight".into()),
            ..FilterArgs::default()
        };
        let err = resolve_filter(&args, FilterTable::Requests).unwrap_err();
        assert!(err.to_string().contains("ISO-8601"));
    }

    #[test]
    fn sort_flags_override_the_default() {
        assert_eq!(resolve_sort(&SortArgs::default()), Sort::default());

        let args = SortArgs {
            sort: Some("cost_usd".into()),
            asc: true,
        };
        let sort = resolve_sort(&args);
        assert_eq!(sort.field, "cost_usd");
        assert_eq!(sort.direction, SortDirection::Asc);
    }
}
