//! Document-store seam for planets.
//!
//! Adapters are thin pass-throughs: no caching, indexing or query logic.
//! "No matching document" is reported in-band (`None` or a zero matched
//! count) so it stays distinguishable from transport failures.

use async_trait::async_trait;

use crate::error::Result;
use crate::planet::{Planet, PlanetId};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::{MongoConfig, MongoStore};

/// A collection of planet documents.
///
/// Implementations must be safe for concurrent use by many requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the document stored under `id`, if any.
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>>;

    /// Insert a document. The caller supplies the id.
    async fn insert_one(&self, planet: &Planet) -> Result<()>;

    /// Set `name` on the document stored under `id`.
    ///
    /// Returns the number of matched documents (0 or 1).
    async fn update_name_by_id(&self, id: PlanetId, name: &str) -> Result<u64>;
}
