//! Filter-tree model and combinators.
//!
//! A filter is a recursive boolean expression over leaf conditions. The wire
//! encoding mirrors the remote service's contract:
//! - the identity filter is the JSON string `"all"`
//! - a leaf is a single-entry table → field → operator → value mapping,
//!   e.g. `{"request_logs": {"model": {"equals": "gpt-4o"}}}`
//! - a branch is `{"left": …, "operator": "and" | "or", "right": …}`
//!
//! Trees are immutable values built bottom-up. `All` is the two-sided
//! identity for AND-combination, so convenience conditions and raw
//! user-supplied trees compose without special cases at call sites.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::CoreError;

/// Tables a leaf condition can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTable {
    /// Request log records.
    Requests,
    /// Session records.
    Sessions,
}

impl FilterTable {
    /// Wire identifier used in the serialized leaf mapping.
    #[must_use]
    pub const fn wire_id(self) -> &'static str {
        match self {
            Self::Requests => "request_logs",
            Self::Sessions => "session_logs",
        }
    }

    fn from_wire_id(id: &str) -> Option<Self> {
        match id {
            "request_logs" => Some(Self::Requests),
            "session_logs" => Some(Self::Sessions),
            _ => None,
        }
    }
}

/// Leaf comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Like,
    Ilike,
    Gte,
    Lte,
    Gt,
    Lt,
}

impl FilterOp {
    const ALL: [Self; 10] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
        Self::Like,
        Self::Ilike,
        Self::Gte,
        Self::Lte,
        Self::Gt,
        Self::Lt,
    ];

    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not-equals",
            Self::Contains => "contains",
            Self::NotContains => "not-contains",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Lt => "lt",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }
}

/// AND/OR connective of a branch node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOperator {
    And,
    Or,
}

impl BranchOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

/// A recursive boolean filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Matches everything; identity for AND-combination.
    All,
    /// A single field/operator/value test.
    Leaf {
        table: FilterTable,
        field: String,
        op: FilterOp,
        value: Value,
    },
    /// An AND/OR combination of two subtrees.
    Branch {
        left: Box<FilterNode>,
        operator: BranchOperator,
        right: Box<FilterNode>,
    },
}

impl FilterNode {
    /// Build a leaf condition.
    pub fn leaf(
        table: FilterTable,
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<Value>,
    ) -> Self {
        Self::Leaf {
            table,
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Combine two subtrees under a connective.
    #[must_use]
    pub fn branch(left: Self, operator: BranchOperator, right: Self) -> Self {
        Self::Branch {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Whether this node is the identity filter.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Left-associated AND-chain over `leaves`, preserving order.
    ///
    /// Zero leaves yields [`FilterNode::All`]; one yields that leaf bare.
    #[must_use]
    pub fn and_chain(leaves: Vec<Self>) -> Self {
        let mut iter = leaves.into_iter();
        let Some(first) = iter.next() else {
            return Self::All;
        };
        iter.fold(first, |acc, next| {
            Self::branch(acc, BranchOperator::And, next)
        })
    }

    /// Parse a raw filter tree from a JSON literal.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFilter`] on malformed JSON or a tree that
    /// does not match the wire contract. This is a fatal user error.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| CoreError::InvalidFilter(format!("malformed JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Convert a decoded JSON value into a filter tree.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFilter`] when the value does not match any
    /// of the three wire shapes.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::String(s) if s == "all" => Ok(Self::All),
            Value::Object(map) if map.is_empty() => Ok(Self::All),
            Value::Object(map) if map.contains_key("left") => {
                let left = map
                    .get("left")
                    .ok_or_else(|| CoreError::InvalidFilter("branch missing 'left'".into()))?;
                let right = map
                    .get("right")
                    .ok_or_else(|| CoreError::InvalidFilter("branch missing 'right'".into()))?;
                let operator = map
                    .get("operator")
                    .and_then(Value::as_str)
                    .ok_or_else(|| CoreError::InvalidFilter("branch missing 'operator'".into()))?;
                let operator = BranchOperator::parse(operator).ok_or_else(|| {
                    CoreError::InvalidFilter(format!(
                        "unknown branch operator '{operator}' (expected 'and' or 'or')"
                    ))
                })?;
                Ok(Self::branch(
                    Self::from_value(left)?,
                    operator,
                    Self::from_value(right)?,
                ))
            }
            Value::Object(map) => Self::leaf_from_map(map),
            other => Err(CoreError::InvalidFilter(format!(
                "expected \"all\", a leaf mapping, or a branch object, got: {other}"
            ))),
        }
    }

    fn leaf_from_map(map: &serde_json::Map<String, Value>) -> Result<Self, CoreError> {
        if map.len() != 1 {
            return Err(CoreError::InvalidFilter(format!(
                "a leaf must have exactly one table key, got {}",
                map.len()
            )));
        }
        let Some((table_id, fields)) = map.iter().next() else {
            return Ok(Self::All);
        };
        let table = FilterTable::from_wire_id(table_id).ok_or_else(|| {
            CoreError::InvalidFilter(format!("unknown table '{table_id}'"))
        })?;
        let fields = fields.as_object().filter(|f| f.len() == 1).ok_or_else(|| {
            CoreError::InvalidFilter(format!(
                "table '{table_id}' must map to exactly one field"
            ))
        })?;
        let Some((field, op_map)) = fields.iter().next() else {
            return Err(CoreError::InvalidFilter(format!(
                "table '{table_id}' must map to exactly one field"
            )));
        };
        let op_map = op_map.as_object().filter(|o| o.len() == 1).ok_or_else(|| {
            CoreError::InvalidFilter(format!(
                "field '{field}' must map to exactly one operator"
            ))
        })?;
        let Some((op_name, value)) = op_map.iter().next() else {
            return Err(CoreError::InvalidFilter(format!(
                "field '{field}' must map to exactly one operator"
            )));
        };
        let op = FilterOp::parse(op_name).ok_or_else(|| {
            CoreError::InvalidFilter(format!(
                "unknown operator '{op_name}' (expected one of: equals, not-equals, contains, not-contains, like, ilike, gte, lte, gt, lt)"
            ))
        })?;
        if !matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
            return Err(CoreError::InvalidFilter(format!(
                "operator '{op_name}' requires a scalar or string value"
            )));
        }
        Ok(Self::leaf(table, field.clone(), op, value.clone()))
    }
}

impl Serialize for FilterNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Leaf {
                table,
                field,
                op,
                value,
            } => {
                let mut op_map = serde_json::Map::with_capacity(1);
                op_map.insert(op.as_str().to_owned(), value.clone());
                let mut field_map = serde_json::Map::with_capacity(1);
                field_map.insert(field.clone(), Value::Object(op_map));

                let mut outer = serializer.serialize_map(Some(1))?;
                outer.serialize_entry(table.wire_id(), &Value::Object(field_map))?;
                outer.end()
            }
            Self::Branch {
                left,
                operator,
                right,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("left", left)?;
                map.serialize_entry("operator", operator.as_str())?;
                map.serialize_entry("right", right)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FilterNode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// AND-combine an optional user-supplied tree with a derived tree.
///
/// `None` and [`FilterNode::All`] are both treated as "no filter" on either
/// side: if one side is empty the other is returned unchanged. Otherwise the
/// user tree becomes the left operand of an `and` branch, so both must hold
/// simultaneously.
#[must_use]
pub fn combine_filters(user: Option<FilterNode>, derived: FilterNode) -> FilterNode {
    match user {
        None | Some(FilterNode::All) => derived,
        Some(user) if derived.is_all() => user,
        Some(user) => FilterNode::branch(user, BranchOperator::And, derived),
    }
}

/// Named optional convenience conditions, compiled into a filter tree.
///
/// Each present condition becomes exactly one leaf, except `search`, which
/// expands to an OR branch matching either the request or response body.
/// Leaves are AND-chained in declaration order; property keys keep their
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct FilterConditions {
    pub model: Option<String>,
    pub model_contains: Option<String>,
    pub status: Option<u16>,
    pub user_id: Option<String>,
    pub provider: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub min_latency: Option<u64>,
    pub max_latency: Option<u64>,
    pub properties: Vec<(String, String)>,
    pub cached: Option<bool>,
    pub search: Option<String>,
    pub request_contains: Option<String>,
    pub response_contains: Option<String>,
}

impl FilterConditions {
    /// Compile the present conditions into a filter tree against `table`.
    ///
    /// Zero conditions yields [`FilterNode::All`]; one yields a bare leaf.
    #[must_use]
    pub fn build(&self, table: FilterTable) -> FilterNode {
        let mut leaves = Vec::new();
        let leaf = |field: &str, op, value: Value| FilterNode::leaf(table, field, op, value);

        if let Some(model) = &self.model {
            leaves.push(leaf("model", FilterOp::Equals, model.as_str().into()));
        }
        if let Some(model) = &self.model_contains {
            leaves.push(leaf("model", FilterOp::Contains, model.as_str().into()));
        }
        if let Some(status) = self.status {
            leaves.push(leaf("status", FilterOp::Equals, status.into()));
        }
        if let Some(user_id) = &self.user_id {
            leaves.push(leaf("user_id", FilterOp::Equals, user_id.as_str().into()));
        }
        if let Some(provider) = &self.provider {
            leaves.push(leaf("provider", FilterOp::Equals, provider.as_str().into()));
        }
        if let Some(start) = self.start_date {
            leaves.push(leaf("created_at", FilterOp::Gte, rfc3339(start).into()));
        }
        if let Some(end) = self.end_date {
            leaves.push(leaf("created_at", FilterOp::Lte, rfc3339(end).into()));
        }
        if let Some(min_cost) = self.min_cost {
            leaves.push(leaf("cost_usd", FilterOp::Gte, min_cost.into()));
        }
        if let Some(max_cost) = self.max_cost {
            leaves.push(leaf("cost_usd", FilterOp::Lte, max_cost.into()));
        }
        if let Some(min_latency) = self.min_latency {
            leaves.push(leaf("latency_ms", FilterOp::Gte, min_latency.into()));
        }
        if let Some(max_latency) = self.max_latency {
            leaves.push(leaf("latency_ms", FilterOp::Lte, max_latency.into()));
        }
        for (key, value) in &self.properties {
            leaves.push(leaf(
                &format!("properties.{key}"),
                FilterOp::Equals,
                value.as_str().into(),
            ));
        }
        if let Some(cached) = self.cached {
            leaves.push(leaf("cached", FilterOp::Equals, cached.into()));
        }
        if let Some(search) = &self.search {
            // Free-text search matches either side of the exchange.
            leaves.push(FilterNode::branch(
                leaf("request_body", FilterOp::Contains, search.as_str().into()),
                BranchOperator::Or,
                leaf("response_body", FilterOp::Contains, search.as_str().into()),
            ));
        }
        if let Some(needle) = &self.request_contains {
            leaves.push(leaf("request_body", FilterOp::Contains, needle.as_str().into()));
        }
        if let Some(needle) = &self.response_contains {
            leaves.push(leaf("response_body", FilterOp::Contains, needle.as_str().into()));
        }

        FilterNode::and_chain(leaves)
    }
}

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn model_leaf(name: &str) -> FilterNode {
        FilterNode::leaf(FilterTable::Requests, "model", FilterOp::Equals, name)
    }

    #[test]
    fn empty_conditions_build_all() {
        let filter = FilterConditions::default().build(FilterTable::Requests);
        assert_eq!(filter, FilterNode::All);
    }

    #[test]
    fn single_condition_builds_bare_leaf() {
        let conditions = FilterConditions {
            model: Some("gpt-4o".into()),
            ..FilterConditions::default()
        };
        let filter = conditions.build(FilterTable::Requests);
        assert_eq!(filter, model_leaf("gpt-4o"));
    }

    #[test]
    fn multiple_conditions_chain_left_associated_in_order() {
        let conditions = FilterConditions {
            model: Some("gpt-4o".into()),
            status: Some(200),
            provider: Some("openai".into()),
            ..FilterConditions::default()
        };
        let filter = conditions.build(FilterTable::Requests);

        // (((model and status) and provider))
        let FilterNode::Branch {
            left,
            operator: BranchOperator::And,
            right,
        } = filter
        else {
            panic!("expected outer and-branch");
        };
        assert_eq!(
            *right,
            FilterNode::leaf(FilterTable::Requests, "provider", FilterOp::Equals, "openai")
        );
        let FilterNode::Branch {
            left: inner_left,
            operator: BranchOperator::And,
            right: inner_right,
        } = *left
        else {
            panic!("expected inner and-branch");
        };
        assert_eq!(*inner_left, model_leaf("gpt-4o"));
        assert_eq!(
            *inner_right,
            FilterNode::leaf(FilterTable::Requests, "status", FilterOp::Equals, 200)
        );
    }

    #[test]
    fn search_expands_to_or_branch_over_both_bodies() {
        let conditions = FilterConditions {
            search: Some("timeout".into()),
            ..FilterConditions::default()
        };
        let filter = conditions.build(FilterTable::Requests);
        assert_eq!(
            filter,
            FilterNode::branch(
                FilterNode::leaf(
                    FilterTable::Requests,
                    "request_body",
                    FilterOp::Contains,
                    "timeout"
                ),
                BranchOperator::Or,
                FilterNode::leaf(
                    FilterTable::Requests,
                    "response_body",
                    FilterOp::Contains,
                    "timeout"
                ),
            )
        );
    }

    #[test]
    fn property_keys_preserve_insertion_order() {
        let conditions = FilterConditions {
            properties: vec![("env".into(), "prod".into()), ("app".into(), "web".into())],
            ..FilterConditions::default()
        };
        let filter = conditions.build(FilterTable::Requests);
        let FilterNode::Branch { left, right, .. } = filter else {
            panic!("expected branch");
        };
        assert!(
            matches!(&*left, FilterNode::Leaf { field, .. } if field == "properties.env")
        );
        assert!(
            matches!(&*right, FilterNode::Leaf { field, .. } if field == "properties.app")
        );
    }

    #[test]
    fn combine_treats_none_and_all_as_identity() {
        let leaf = model_leaf("gpt-4o");
        assert_eq!(combine_filters(None, leaf.clone()), leaf);
        assert_eq!(combine_filters(Some(FilterNode::All), leaf.clone()), leaf);
        assert_eq!(combine_filters(Some(leaf.clone()), FilterNode::All), leaf);
        assert_eq!(combine_filters(None, FilterNode::All), FilterNode::All);
    }

    #[test]
    fn combine_ands_user_tree_on_the_left() {
        let user = model_leaf("gpt-4o");
        let derived = FilterNode::leaf(FilterTable::Requests, "status", FilterOp::Equals, 200);
        let combined = combine_filters(Some(user.clone()), derived.clone());
        assert_eq!(
            combined,
            FilterNode::branch(user, BranchOperator::And, derived)
        );
    }

    #[test]
    fn all_serializes_as_string_marker() {
        assert_eq!(serde_json::to_value(FilterNode::All).unwrap(), json!("all"));
    }

    #[test]
    fn leaf_serializes_as_nested_single_entry_maps() {
        let value = serde_json::to_value(model_leaf("gpt-4o")).unwrap();
        assert_eq!(
            value,
            json!({"request_logs": {"model": {"equals": "gpt-4o"}}})
        );
    }

    #[test]
    fn branch_serializes_recursively() {
        let tree = FilterNode::branch(
            model_leaf("gpt-4o"),
            BranchOperator::Or,
            FilterNode::leaf(FilterTable::Requests, "status", FilterOp::Gte, 400),
        );
        assert_eq!(
            serde_json::to_value(tree).unwrap(),
            json!({
                "left": {"request_logs": {"model": {"equals": "gpt-4o"}}},
                "operator": "or",
                "right": {"request_logs": {"status": {"gte": 400}}},
            })
        );
    }

    #[test]
    fn parse_round_trips_a_branch() {
        let input = r#"{
            "left": {"request_logs": {"model": {"contains": "claude"}}},
            "operator": "and",
            "right": {"request_logs": {"latency_ms": {"lt": 2000}}}
        }"#;
        let tree = FilterNode::parse(input).unwrap();
        let reserialized = serde_json::to_value(&tree).unwrap();
        assert_eq!(reserialized, serde_json::from_str::<Value>(input).unwrap());
    }

    #[test]
    fn parse_accepts_all_marker_and_empty_object() {
        assert_eq!(FilterNode::parse("\"all\"").unwrap(), FilterNode::All);
        assert_eq!(FilterNode::parse("{}").unwrap(), FilterNode::All);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = FilterNode::parse("{not json").unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[test]
    fn parse_rejects_unknown_operator() {
        let err =
            FilterNode::parse(r#"{"request_logs": {"model": {"matches": "x"}}}"#).unwrap_err();
        assert!(err.to_string().contains("unknown operator 'matches'"));
    }

    #[test]
    fn parse_rejects_unknown_table() {
        let err = FilterNode::parse(r#"{"traces": {"model": {"equals": "x"}}}"#).unwrap_err();
        assert!(err.to_string().contains("unknown table 'traces'"));
    }

    #[test]
    fn parse_rejects_non_scalar_value() {
        let err =
            FilterNode::parse(r#"{"request_logs": {"model": {"equals": ["a", "b"]}}}"#)
                .unwrap_err();
        assert!(err.to_string().contains("scalar or string value"));
    }
}
