//! Application state for the planets HTTP service.
//!
//! [`AppState`] carries one handle per planet capability plus the metrics
//! registry. Each handler extracts only the capability it needs through
//! `State<Arc<dyn PlanetGetter>>` and friends; the [`FromRef`] impls below
//! make that work against a router whose state is `AppState`.

use std::sync::Arc;

use axum::extract::FromRef;
use planets_lib::{PlanetGetter, PlanetInserter, PlanetUpdater};

use crate::metrics::HttpMetrics;

/// Shared application state for all axum handlers.
///
/// Cheap to clone; every field is reference counted.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use planets_lib::{MemoryStore, PlanetService};
/// use planets_service_shared::{AppState, HttpMetrics, MetricsConfig};
///
/// let service = PlanetService::new(Arc::new(MemoryStore::new()));
/// let state = AppState::new(Arc::new(service), HttpMetrics::new(&MetricsConfig::default()));
/// ```
#[derive(Clone)]
pub struct AppState {
    inserter: Arc<dyn PlanetInserter>,
    getter: Arc<dyn PlanetGetter>,
    updater: Arc<dyn PlanetUpdater>,
    metrics: HttpMetrics,
}

impl AppState {
    /// Build state from one value that provides every capability.
    pub fn new<S>(planets: Arc<S>, metrics: HttpMetrics) -> Self
    where
        S: PlanetInserter + PlanetGetter + PlanetUpdater + 'static,
    {
        Self {
            inserter: planets.clone(),
            getter: planets.clone(),
            updater: planets,
            metrics,
        }
    }

    pub fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }
}

impl FromRef<AppState> for Arc<dyn PlanetInserter> {
    fn from_ref(state: &AppState) -> Self {
        state.inserter.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PlanetGetter> {
    fn from_ref(state: &AppState) -> Self {
        state.getter.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PlanetUpdater> {
    fn from_ref(state: &AppState) -> Self {
        state.updater.clone()
    }
}

impl FromRef<AppState> for HttpMetrics {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture_planet, test_metrics, Outcome, StubPlanets};

    #[tokio::test]
    async fn test_capabilities_share_one_backing_value() {
        let stub = Arc::new(StubPlanets {
            get: Outcome::Ok(fixture_planet()),
            ..StubPlanets::default()
        });
        let state = AppState::new(stub.clone(), test_metrics());

        let getter = <Arc<dyn PlanetGetter>>::from_ref(&state);
        let planet = getter.get_by_id("5f165e2e4de9b442e60b3904").await.unwrap();
        assert_eq!(planet, fixture_planet());

        let inserter = <Arc<dyn PlanetInserter>>::from_ref(&state);
        let _ = inserter.insert(planets_lib::NewPlanet::new("Venus")).await;

        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_metrics_clone_shares_registry() {
        let state = AppState::new(Arc::new(StubPlanets::default()), test_metrics());
        HttpMetrics::from_ref(&state).record_request(
            "get",
            "/health",
            200,
            std::time::Duration::from_millis(1),
        );
        assert!(state.metrics().render().contains("code=\"200\""));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::new(Arc::new(StubPlanets::default()), test_metrics());
        assert!(format!("{:?}", state).contains("AppState"));
    }
}
