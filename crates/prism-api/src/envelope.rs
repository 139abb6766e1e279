//! Response envelope handling.
//!
//! The service wraps responses as `{ "data": …, "error": … }`. A populated
//! `error` is a service-level failure regardless of `data`. A response
//! lacking the envelope entirely is treated as a bare successful payload.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Unwrap a decoded response body into its payload.
///
/// # Errors
///
/// Returns [`ApiError::Service`] when the envelope carries an error or is
/// empty, [`ApiError::Parse`] when the payload does not decode as `T`.
pub(crate) fn parse_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let is_envelope = value
        .as_object()
        .is_some_and(|map| map.contains_key("data") || map.contains_key("error"));

    if is_envelope {
        let envelope: Envelope<T> =
            serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;
        if let Some(error) = envelope.error {
            return Err(ApiError::Service(error));
        }
        return envelope
            .data
            .ok_or_else(|| ApiError::Service("response contained neither data nor error".into()));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn data_envelope_unwraps_payload() {
        let count: u64 = parse_envelope(json!({"data": 42, "error": null})).unwrap();
        assert_eq!(count, 42);
    }

    #[test]
    fn error_envelope_becomes_service_error() {
        let result: Result<u64, _> = parse_envelope(json!({"data": null, "error": "boom"}));
        assert!(matches!(result, Err(ApiError::Service(message)) if message == "boom"));
    }

    #[test]
    fn error_wins_over_data_when_both_present() {
        let result: Result<u64, _> = parse_envelope(json!({"data": 42, "error": "boom"}));
        assert!(matches!(result, Err(ApiError::Service(_))));
    }

    #[test]
    fn bare_payload_is_an_implicit_success() {
        let rows: Vec<u64> = parse_envelope(json!([1, 2, 3])).unwrap();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn empty_envelope_is_a_service_error() {
        let result: Result<u64, _> = parse_envelope(json!({"data": null}));
        assert!(matches!(result, Err(ApiError::Service(_))));
    }

    #[test]
    fn mismatched_payload_is_a_parse_error() {
        let result: Result<u64, _> = parse_envelope(json!({"data": "not-a-number"}));
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }
}
