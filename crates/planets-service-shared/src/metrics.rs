//! Prometheus metrics infrastructure for the planets service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Constant labels attached to every series
//! - [`HttpMetrics`]: An explicitly constructed metrics registry
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//!
//! No process-global recorder is installed. Each [`HttpMetrics`] owns its
//! own Prometheus recorder and records through
//! [`metrics::with_local_recorder`], so separate instances (for example one
//! per test) never share series.
//!
//! # Example
//!
//! ```no_run
//! use planets_service_shared::metrics::{HttpMetrics, MetricsConfig};
//!
//! let metrics = HttpMetrics::new(&MetricsConfig::from_env());
//! metrics.record_request("get", "/v1/planets/{id}", 200, std::time::Duration::from_millis(3));
//! println!("{}", metrics.render());
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

/// Counter of handled requests.
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Histogram of handler latency.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

const ENVIRONMENT_LABEL: &str = "environment";
const APP_NAME_LABEL: &str = "app_name";

/// `kind` label value for requests this service received.
pub const INCOMING_KIND: &str = "incoming";

/// Configuration for the metrics system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Deployment environment, exported as the `environment` label.
    pub environment: String,
    /// Application name, exported as the `app_name` label.
    pub app_name: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            app_name: "planets-service".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `ENVIRONMENT`: Deployment environment (default: "local")
    /// - `APP_NAME`: Application name (default: "planets-service")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),
        }
    }
}

/// HTTP metrics registry.
///
/// Cheap to clone; clones record into the same registry.
#[derive(Clone)]
pub struct HttpMetrics {
    recorder: Arc<PrometheusRecorder>,
    handle: PrometheusHandle,
}

impl HttpMetrics {
    /// Build a registry whose series all carry the configured constant labels.
    pub fn new(config: &MetricsConfig) -> Self {
        let recorder = PrometheusBuilder::new()
            .add_global_label(ENVIRONMENT_LABEL, config.environment.clone())
            .add_global_label(APP_NAME_LABEL, config.app_name.clone())
            .build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            metrics::describe_counter!(
                HTTP_REQUESTS_TOTAL,
                "Total number of requests by path and HTTP code."
            );
            metrics::describe_histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                metrics::Unit::Seconds,
                "Request handling latency by path."
            );
        });

        Self {
            recorder: Arc::new(recorder),
            handle,
        }
    }

    /// Record one handled incoming request.
    ///
    /// `path` must be the route template (e.g. `/v1/planets/{id}`), never the
    /// raw request path, to keep label cardinality bounded.
    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        metrics::with_local_recorder(self.recorder.as_ref(), || {
            metrics::counter!(
                HTTP_REQUESTS_TOTAL,
                "method" => method.to_string(),
                "code" => status.to_string(),
                "path" => path.to_string(),
                "kind" => INCOMING_KIND
            )
            .increment(1);

            metrics::histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                "method" => method.to_string(),
                "path" => path.to_string()
            )
            .record(elapsed.as_secs_f64());
        });
    }

    /// Render all series in Prometheus exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Drain buffered histogram samples into their summaries.
    ///
    /// Rendering does this too; call it periodically so samples do not
    /// accumulate between scrapes.
    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }

    /// Run [`HttpMetrics::run_upkeep`] every `period` until the task is
    /// dropped or aborted.
    pub async fn upkeep_loop(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.run_upkeep();
        }
    }
}

impl std::fmt::Debug for HttpMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetrics").finish_non_exhaustive()
    }
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler(State(metrics): State<HttpMetrics>) -> String {
    metrics.render()
}
