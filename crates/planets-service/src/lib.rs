//! Planets REST HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /v1/planets` - Create a planet
//! - `GET /v1/planets/{id}` - Fetch a planet by id
//! - `PUT /v1/planets/{id}` - Rename a planet
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health` - Liveness probe
//!
//! The binary in `main.rs` wires configuration, the document store and
//! [`server::serve`]; everything else lives here so it can be tested.

#![deny(warnings)]

pub mod handlers;
pub mod router;
pub mod server;

pub use router::router;
pub use server::{serve, shutdown_signal, ShutdownError};
