//! Test utilities for handler testing.
//!
//! [`StubPlanets`] implements every planet capability with a canned
//! [`Outcome`] per operation and counts how often it was called, so tests can
//! assert that rejected requests never reach the store.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use planets_lib::{
    Error, NewPlanet, Planet, PlanetGetter, PlanetId, PlanetInserter, PlanetUpdater,
};

use crate::metrics::{HttpMetrics, MetricsConfig};
use crate::state::AppState;

/// Id of [`fixture_planet`].
pub const FIXTURE_PLANET_ID: &str = "5f165e2e4de9b442e60b3904";

/// A stored planet used across handler tests.
pub fn fixture_planet() -> Planet {
    Planet {
        id: FIXTURE_PLANET_ID.parse().unwrap_or_else(|_| PlanetId::nil()),
        name: "Mars".to_string(),
    }
}

/// Canned result of one stubbed operation.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    /// The store failed with a generic `database error`.
    Failure,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Outcome::Failure
    }
}

impl<T: Clone> Outcome<T> {
    fn resolve(&self) -> planets_lib::Result<T> {
        match self {
            Outcome::Ok(value) => Ok(value.clone()),
            Outcome::NotFound => Err(Error::PlanetNotFound),
            Outcome::Failure => Err(Error::Database(
                io::Error::new(io::ErrorKind::ConnectionRefused, "database error").into(),
            )),
        }
    }
}

/// Stub for all three planet capabilities.
#[derive(Debug, Default)]
pub struct StubPlanets {
    pub insert: Outcome<Planet>,
    pub get: Outcome<Planet>,
    pub update: Outcome<u64>,
    pub calls: AtomicUsize,
    pub last_update: Mutex<Option<Planet>>,
}

impl StubPlanets {
    /// Total number of capability calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The planet passed to the most recent `update` call.
    pub fn last_update(&self) -> Option<Planet> {
        self.last_update
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PlanetInserter for StubPlanets {
    async fn insert(&self, _planet: NewPlanet) -> planets_lib::Result<Planet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.insert.resolve()
    }
}

#[async_trait]
impl PlanetGetter for StubPlanets {
    async fn get_by_id(&self, _id: &str) -> planets_lib::Result<Planet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.get.resolve()
    }
}

#[async_trait]
impl PlanetUpdater for StubPlanets {
    async fn update(&self, planet: Planet) -> planets_lib::Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_update.lock() {
            *last = Some(planet);
        }
        self.update.resolve()
    }
}

/// A fresh metrics registry with test labels.
pub fn test_metrics() -> HttpMetrics {
    HttpMetrics::new(&MetricsConfig {
        environment: "test".to_string(),
        app_name: "planets-service".to_string(),
    })
}

/// Application state whose capabilities are all served by `stub`.
pub fn test_state(stub: Arc<StubPlanets>) -> AppState {
    AppState::new(stub, test_metrics())
}
