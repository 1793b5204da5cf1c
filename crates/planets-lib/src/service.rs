//! Domain operations over planets.
//!
//! Each operation is exposed through its own capability trait so HTTP
//! handlers can depend on exactly the operation they need and be tested
//! against a stub of just that operation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::planet::{NewPlanet, Planet, PlanetId};
use crate::store::DocumentStore;

/// Creates planets.
#[async_trait]
pub trait PlanetInserter: Send + Sync {
    /// Assign a fresh id to `planet` and persist it.
    async fn insert(&self, planet: NewPlanet) -> Result<Planet>;
}

/// Looks planets up by id.
#[async_trait]
pub trait PlanetGetter: Send + Sync {
    /// Fetch the planet stored under `id`.
    ///
    /// `id` is taken verbatim; an unparseable id behaves like an unknown one.
    async fn get_by_id(&self, id: &str) -> Result<Planet>;
}

/// Renames planets.
#[async_trait]
pub trait PlanetUpdater: Send + Sync {
    /// Set the name of the planet stored under `planet.id`.
    ///
    /// Returns the matched document count, which is at least 1 on success.
    async fn update(&self, planet: Planet) -> Result<u64>;
}

/// Planet operations backed by a [`DocumentStore`].
///
/// Cheap to clone; every clone shares the same store.
#[derive(Clone)]
pub struct PlanetService {
    store: Arc<dyn DocumentStore>,
}

impl PlanetService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for PlanetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanetService").finish_non_exhaustive()
    }
}

#[async_trait]
impl PlanetInserter for PlanetService {
    async fn insert(&self, planet: NewPlanet) -> Result<Planet> {
        let planet = Planet {
            id: PlanetId::generate(),
            name: planet.name,
        };
        self.store.insert_one(&planet).await?;
        tracing::debug!(id = %planet.id, "planet inserted");
        Ok(planet)
    }
}

#[async_trait]
impl PlanetGetter for PlanetService {
    async fn get_by_id(&self, id: &str) -> Result<Planet> {
        let id = PlanetId::parse_lenient(id);
        self.store
            .find_by_id(id)
            .await?
            .ok_or(Error::PlanetNotFound)
    }
}

#[async_trait]
impl PlanetUpdater for PlanetService {
    async fn update(&self, planet: Planet) -> Result<u64> {
        let matched = self
            .store
            .update_name_by_id(planet.id, &planet.name)
            .await?;

        if matched == 0 {
            return Err(Error::PlanetNotFound);
        }

        Ok(matched)
    }
}
