//! Liveness handler.
//!
//! `/health` reports that the process is serving requests. It never touches
//! the document store.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Body of a `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(rename = "Message")]
    pub message: String,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            message: "UP".to_string(),
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health
/// {"Message":"UP"}
/// ```
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::up()))
}
