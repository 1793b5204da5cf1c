//! Shared infrastructure for the planets HTTP service.
//!
//! This crate provides the HTTP glue that sits between axum and `planets-lib`:
//!
//! - [`AppState`]: The capability container handed to every handler
//! - [`ServiceConfig`]: Environment-driven service configuration
//! - [`health`]: The `/health` handler
//! - [`ErrorResponse`]: Stable error codes and the JSON error body
//! - [`metrics`]: Prometheus metrics owned by an explicit [`HttpMetrics`]
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request-id propagation and metrics middleware
//! - [`decode_and_validate`]: Payload decoding with field constraints
//!
//! # Architecture
//!
//! Handlers stay thin; all persistence behavior lives in `planets-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Decode and validate the payload                          │
//! │  - Call one planets-lib capability                          │
//! │  - Map the outcome to a status code and body                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides stub capabilities and fixtures for
//! handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod config;
mod error_response;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig, StoreBackend};
pub use error_response::{
    ErrorResponse, FieldViolation, ERROR_CODE_DECODE_FAILED, ERROR_CODE_INSERT_FAILED,
    ERROR_CODE_INVALID_PAYLOAD, ERROR_CODE_NOT_FOUND, ERROR_CODE_RETRIEVE_FAILED,
    ERROR_CODE_UPDATE_FAILED,
};
pub use health::{health, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
pub use metrics::{metrics_handler, HttpMetrics, MetricsConfig};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, RequestIdLayer};
pub use request::{decode_and_validate, required, PayloadError, PlanetRequest, Validate};
pub use state::AppState;
