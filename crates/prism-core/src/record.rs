//! Map-backed request and session record wrappers.
//!
//! The remote service returns records with a fixed per-entity shape, but the
//! pipeline only ever accesses fields by name for display, grouping, and
//! aggregation. Wrapping the decoded JSON map keeps unknown fields intact for
//! export while giving aggregation typed accessors. Records are read-only
//! after retrieval except for body enrichment before export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder for missing display values.
pub const MISSING_DISPLAY: &str = "N/A";

/// Bucket key for missing model/provider values in aggregation.
pub const UNKNOWN_GROUP: &str = "unknown";

/// One request log record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestRecord {
    fields: Map<String, Value>,
}

impl RequestRecord {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw access to a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field rendered for display; missing values become `N/A`.
    #[must_use]
    pub fn display_field(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map_or_else(|| MISSING_DISPLAY.to_string(), display_value)
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        str_field(&self.fields, "request_id")
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        str_field(&self.fields, "model")
    }

    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        str_field(&self.fields, "provider")
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        str_field(&self.fields, "user_id")
    }

    #[must_use]
    pub fn status(&self) -> Option<i64> {
        self.fields.get("status").and_then(Value::as_i64)
    }

    #[must_use]
    pub fn cost_usd(&self) -> Option<f64> {
        num_field(&self.fields, "cost_usd")
    }

    #[must_use]
    pub fn latency_ms(&self) -> Option<f64> {
        num_field(&self.fields, "latency_ms")
    }

    /// Total token count. The service sometimes returns this as a numeric
    /// string; both forms parse.
    #[must_use]
    pub fn total_tokens(&self) -> Option<f64> {
        num_field(&self.fields, "total_tokens")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        date_field(&self.fields, "created_at")
    }

    /// URL of the externally-hosted body payload, when the service returned
    /// one.
    #[must_use]
    pub fn signed_body_url(&self) -> Option<&str> {
        str_field(&self.fields, "signed_body_url")
    }

    /// Merge a fetched body payload into the record before export.
    ///
    /// This is the only mutation a record ever sees.
    pub fn attach_body(&mut self, request: Option<Value>, response: Option<Value>) {
        if let Some(request) = request {
            self.fields.insert("request_body".to_string(), request);
        }
        if let Some(response) = response {
            self.fields.insert("response_body".to_string(), response);
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// One session record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord {
    fields: Map<String, Value>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn display_field(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map_or_else(|| MISSING_DISPLAY.to_string(), display_value)
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        str_field(&self.fields, "session_id")
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        str_field(&self.fields, "name")
    }

    #[must_use]
    pub fn total_cost(&self) -> Option<f64> {
        num_field(&self.fields, "total_cost")
    }

    #[must_use]
    pub fn total_tokens(&self) -> Option<f64> {
        num_field(&self.fields, "total_tokens")
    }

    #[must_use]
    pub fn total_requests(&self) -> Option<f64> {
        num_field(&self.fields, "total_requests")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        date_field(&self.fields, "created_at")
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn str_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields.get(name).and_then(Value::as_str)
}

/// Numeric field access tolerating numeric-string encodings.
fn num_field(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    match fields.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn date_field(fields: &Map<String, Value>, name: &str) -> Option<DateTime<Utc>> {
    str_field(fields, name)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING_DISPLAY.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| MISSING_DISPLAY.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> RequestRecord {
        serde_json::from_value(value).expect("record should deserialize")
    }

    #[test]
    fn numeric_string_tokens_parse() {
        let rec = record(json!({"total_tokens": "1523"}));
        assert_eq!(rec.total_tokens(), Some(1523.0));

        let rec = record(json!({"total_tokens": 1523}));
        assert_eq!(rec.total_tokens(), Some(1523.0));

        let rec = record(json!({"total_tokens": "not-a-number"}));
        assert_eq!(rec.total_tokens(), None);
    }

    #[test]
    fn missing_fields_display_as_placeholder() {
        let rec = record(json!({"model": "gpt-4o"}));
        assert_eq!(rec.display_field("model"), "gpt-4o");
        assert_eq!(rec.display_field("provider"), "N/A");
        assert_eq!(record(json!({"provider": null})).display_field("provider"), "N/A");
    }

    #[test]
    fn attach_body_merges_only_present_sides() {
        let mut rec = record(json!({"request_id": "req-1"}));
        rec.attach_body(Some(json!({"prompt": "hi"})), None);
        assert_eq!(rec.field("request_body"), Some(&json!({"prompt": "hi"})));
        assert_eq!(rec.field("response_body"), None);
    }

    #[test]
    fn created_at_parses_rfc3339() {
        let rec = record(json!({"created_at": "2024-06-01T10:30:00Z"}));
        assert!(rec.created_at().is_some());
        assert_eq!(record(json!({"created_at": "soon"})).created_at(), None);
    }

    #[test]
    fn serde_is_transparent_over_the_field_map() {
        let value = json!({"request_id": "req-1", "custom": {"a": 1}});
        let rec = record(value.clone());
        assert_eq!(serde_json::to_value(&rec).unwrap(), value);
    }
}
