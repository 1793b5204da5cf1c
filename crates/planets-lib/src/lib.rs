//! Planets library entry points.
//!
//! This crate owns the `Planet` entity, the document-store seam it is
//! persisted through, and the service that translates store outcomes into
//! domain results. Higher-level consumers (the HTTP service) should only
//! depend on the types exported here instead of talking to the store
//! directly.

#![deny(warnings)]

pub mod error;
pub mod planet;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use planet::{NewPlanet, Planet, PlanetId};
pub use service::{PlanetGetter, PlanetInserter, PlanetService, PlanetUpdater};
pub use store::{DocumentStore, MemoryStore, MongoConfig, MongoStore};
