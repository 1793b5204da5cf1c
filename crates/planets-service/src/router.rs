use axum::{
    routing::{get, post},
    Router,
};
use planets_service_shared::{health, metrics_handler, AppState, MetricsLayer, RequestIdLayer};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_planet, get_planet, update_planet};

/// Build the service router.
///
/// Middleware is attached with `route_layer`, so only matched routes are
/// instrumented. Order, outermost first: metrics, request id, trace.
pub fn router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(MetricsLayer::new(state.metrics().clone()))
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/v1/planets", post(create_planet))
        .route("/v1/planets/{id}", get(get_planet).put(update_planet))
        .route_layer(middleware)
        .with_state(state)
}
