//! Planets REST HTTP microservice.
//!
//! # Configuration
//!
//! - `PORT` - HTTP port (default: 8080)
//! - `STORE_BACKEND` - `mongo` (default) or `memory`
//! - `MONGO_URI`, `MONGO_DB`, `MONGO_COLLECTION`, `MONGO_TIMEOUT_SECS`
//! - `ENVIRONMENT`, `APP_NAME` - constant metrics labels
//! - `SHUTDOWN_GRACE_SECS` - drain bound on shutdown (default: 5)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use planets_lib::{DocumentStore, MemoryStore, MongoStore, PlanetService};
use planets_service::{router, serve, shutdown_signal};
use planets_service_shared::{
    init_logging, AppState, HttpMetrics, LoggingConfig, MetricsConfig, ServiceConfig, StoreBackend,
};

/// How often buffered histogram samples are folded into summaries.
const METRICS_UPKEEP_PERIOD: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("failed to read configuration")?;

    let logging_config = LoggingConfig::from_env().with_service("planets-service");
    init_logging(&logging_config)?;

    let metrics = HttpMetrics::new(&MetricsConfig::from_env());
    let upkeep = tokio::spawn(metrics.clone().upkeep_loop(METRICS_UPKEEP_PERIOD));

    info!(port = config.port, store = ?config.store, "starting planets service");

    let store: Arc<dyn DocumentStore> = match config.store {
        StoreBackend::Mongo => {
            let uri = &config.mongo.uri;
            let store = MongoStore::connect(&config.mongo)
                .await
                .with_context(|| format!("failed to connect to MongoDB at {uri}"))?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("using in-memory store, planets are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let service = PlanetService::new(store);
    let app = router(AppState::new(Arc::new(service), metrics));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %addr, "listening");

    let served = serve(listener, app, shutdown_signal, config.shutdown_grace).await;
    upkeep.abort();
    served?;

    info!("shutdown complete");
    Ok(())
}
