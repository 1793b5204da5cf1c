//! JSON error bodies and their stable error codes.
//!
//! Every failed request answers with the same shape:
//!
//! ```json
//! {"error_code":"WA:003","message":"planet not found"}
//! ```
//!
//! Validation failures add a `details` array with one entry per violated
//! field. Internal error text never reaches the client; it is logged by the
//! handler instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Payload decoded but violated one or more field constraints.
pub const ERROR_CODE_INVALID_PAYLOAD: &str = "WA:001";

/// The document store rejected an insert.
pub const ERROR_CODE_INSERT_FAILED: &str = "WA:002";

/// No planet is stored under the requested id.
pub const ERROR_CODE_NOT_FOUND: &str = "WA:003";

/// The document store failed a lookup.
pub const ERROR_CODE_RETRIEVE_FAILED: &str = "WA:004";

/// The document store failed an update.
///
/// Shares its value with [`ERROR_CODE_INVALID_PAYLOAD`]; clients already
/// depend on it, so it is kept as is.
pub const ERROR_CODE_UPDATE_FAILED: &str = "WA:001";

/// The request body was not well-formed JSON of the expected shape.
pub const ERROR_CODE_DECODE_FAILED: &str = "WA:007";

/// One violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Declared field name, e.g. `Name`.
    pub name: String,
    /// Human-readable reason the field was rejected.
    pub reason: String,
}

impl FieldViolation {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// An error response: HTTP status plus the JSON body sent to the client.
///
/// # Example
///
/// ```
/// use planets_service_shared::ErrorResponse;
///
/// let error = ErrorResponse::planet_not_found();
/// assert_eq!(error.status.as_u16(), 404);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Status the response is sent with. Not part of the body.
    #[serde(skip)]
    pub status: StatusCode,

    /// Stable machine-readable code such as `WA:003`.
    pub error_code: String,

    /// Short human-readable summary.
    pub message: String,

    /// Per-field violations, present only for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldViolation>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error_code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code: error_code.to_string(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<FieldViolation>) -> Self {
        self.details = details;
        self
    }

    /// 400 for a body that is not decodable JSON.
    pub fn decode_failed() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ERROR_CODE_DECODE_FAILED,
            "failed to decode payload",
        )
    }

    /// 422 for a body that decoded but failed field constraints.
    pub fn invalid_payload(details: Vec<FieldViolation>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ERROR_CODE_INVALID_PAYLOAD,
            "payload is invalid",
        )
        .with_details(details)
    }

    pub fn insert_failed() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ERROR_CODE_INSERT_FAILED,
            "failed to insert the planet",
        )
    }

    pub fn planet_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, ERROR_CODE_NOT_FOUND, "planet not found")
    }

    pub fn retrieve_failed() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ERROR_CODE_RETRIEVE_FAILED,
            "failed to retrieve a planet by id",
        )
    }

    pub fn update_failed() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ERROR_CODE_UPDATE_FAILED,
            "failed to update the planet",
        )
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}
