//! Request payloads and validation for HTTP endpoints.
//!
//! Decoding and validation are pure: [`decode_and_validate`] never writes a
//! response. The handler turns a [`PayloadError`] into an [`ErrorResponse`]
//! and remains the only place that answers the client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ErrorResponse, FieldViolation};

/// Validation trait for request types.
///
/// Implementations check every declared constraint and report all
/// violations, in field declaration order.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldViolation>>;
}

/// Why a payload was rejected.
#[derive(Debug)]
pub enum PayloadError {
    /// Malformed JSON or a type mismatch.
    Decode(serde_json::Error),
    /// Well-formed JSON that violated field constraints.
    Invalid(Vec<FieldViolation>),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::Decode(e) => write!(f, "failed to decode payload: {}", e),
            PayloadError::Invalid(violations) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.name.as_str()).collect();
                write!(f, "payload is invalid: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PayloadError::Decode(e) => Some(e),
            PayloadError::Invalid(_) => None,
        }
    }
}

impl From<PayloadError> for ErrorResponse {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Decode(_) => ErrorResponse::decode_failed(),
            PayloadError::Invalid(violations) => ErrorResponse::invalid_payload(violations),
        }
    }
}

/// Decode `body` as a JSON object into `T`, then apply `T`'s field
/// constraints.
///
/// Decoding happens first: a body that is not a JSON object, or whose
/// fields have the wrong types, is a [`PayloadError::Decode`] and
/// constraints are never checked. Arrays are rejected even though serde
/// would otherwise map them onto struct fields by position. A key repeated
/// in the object keeps its last value.
pub fn decode_and_validate<T>(body: &[u8]) -> Result<T, PayloadError>
where
    T: DeserializeOwned + Validate,
{
    let value: Value = serde_json::from_slice(body).map_err(PayloadError::Decode)?;
    if !value.is_object() {
        return Err(PayloadError::Decode(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        ))));
    }

    let payload: T = serde_json::from_value(value).map_err(PayloadError::Decode)?;
    payload.validate().map_err(PayloadError::Invalid)?;
    Ok(payload)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The `required` constraint: the value must be present and non-empty.
///
/// Returns the violation for `field` when the constraint fails.
pub fn required(field: &str, value: Option<&str>) -> Option<FieldViolation> {
    match value {
        Some(v) if !v.is_empty() => None,
        _ => Some(FieldViolation::new(
            field,
            format!("Field validation for '{}' failed on the 'required' tag", field),
        )),
    }
}

/// Body of create and update planet requests.
///
/// `name` is optional at the decode stage so that a missing or `null` name
/// is reported as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl PlanetRequest {
    /// The validated name. Empty if called on an unvalidated request.
    pub fn into_name(self) -> String {
        self.name.unwrap_or_default()
    }
}

impl Validate for PlanetRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let violations: Vec<FieldViolation> = [required("Name", self.name.as_deref())]
            .into_iter()
            .flatten()
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_planet_request() {
        let request: PlanetRequest = decode_and_validate(br#"{"name": "Mars"}"#).unwrap();
        assert_eq!(request.into_name(), "Mars");
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = decode_and_validate::<PlanetRequest>(br#"{: "Mars"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Decode(_)));
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let err = decode_and_validate::<PlanetRequest>(br#"{"name": 42}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Decode(_)));
    }

    #[test]
    fn test_empty_body_is_decode_error() {
        let err = decode_and_validate::<PlanetRequest>(b"").unwrap_err();
        assert!(matches!(err, PayloadError::Decode(_)));
    }

    #[test]
    fn test_non_object_json_is_decode_error() {
        for body in [
            &br#"["Mars"]"#[..],
            &b"[]"[..],
            &br#""Mars""#[..],
            &b"42"[..],
            &b"true"[..],
            &b"null"[..],
        ] {
            let err = decode_and_validate::<PlanetRequest>(body).unwrap_err();
            assert!(
                matches!(err, PayloadError::Decode(_)),
                "{}: {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_array_error_names_the_kind() {
        let err = decode_and_validate::<PlanetRequest>(br#"["Mars"]"#).unwrap_err();
        assert!(err.to_string().contains("found an array"), "{err}");
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let request: PlanetRequest =
            decode_and_validate(br#"{"name": "Mars", "name": "Venus"}"#).unwrap();
        assert_eq!(request.into_name(), "Venus");
    }

    #[test]
    fn test_capitalised_key_is_not_the_name_field() {
        let err = decode_and_validate::<PlanetRequest>(br#"{"Name": "Mars"}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Invalid(ref v) if v.len() == 1));
    }

    #[test]
    fn test_missing_name_is_single_violation() {
        let err = decode_and_validate::<PlanetRequest>(br#"{"test": "Mars"}"#).unwrap_err();
        match err {
            PayloadError::Invalid(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].name, "Name");
                assert!(violations[0].reason.contains("required"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_null_and_empty_name_fail_required() {
        for body in [&br#"{"name": null}"#[..], &br#"{"name": ""}"#[..]] {
            let err = decode_and_validate::<PlanetRequest>(body).unwrap_err();
            assert!(matches!(err, PayloadError::Invalid(ref v) if v.len() == 1));
        }
    }

    #[test]
    fn test_required_helper() {
        assert!(required("Name", Some("Mars")).is_none());
        assert!(required("Name", Some("")).is_some());
        assert!(required("Name", None).is_some());
    }

    #[test]
    fn test_payload_error_maps_to_error_response() {
        let decode = decode_and_validate::<PlanetRequest>(b"{").unwrap_err();
        let response = ErrorResponse::from(decode);
        assert_eq!(response.error_code, "WA:007");
        assert_eq!(response.status.as_u16(), 400);

        let invalid = decode_and_validate::<PlanetRequest>(b"{}").unwrap_err();
        assert_eq!(invalid.to_string(), "payload is invalid: Name");
        let response = ErrorResponse::from(invalid);
        assert_eq!(response.error_code, "WA:001");
        assert_eq!(response.status.as_u16(), 422);
        assert_eq!(response.details.len(), 1);
    }
}
