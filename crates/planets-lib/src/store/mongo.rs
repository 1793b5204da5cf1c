use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::planet::{Planet, PlanetId};
use crate::store::DocumentStore;

/// Connection settings for [`MongoStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Applied as both connect and server-selection timeout.
    pub timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "planet".to_string(),
            collection: "planet".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// On-disk shape of a planet.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlanetDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
}

impl From<PlanetDocument> for Planet {
    fn from(doc: PlanetDocument) -> Self {
        Planet {
            id: PlanetId::from(doc.id),
            name: doc.name,
        }
    }
}

/// [`DocumentStore`] backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<PlanetDocument>,
}

impl MongoStore {
    /// Connect and verify the server answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] if the URI is malformed or the
    /// server cannot be reached within `config.timeout`.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(config.uri.as_str()).await?;
        options.connect_timeout = Some(config.timeout);
        options.server_selection_timeout = Some(config.timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "connected to document store"
        );

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(found.map(Planet::from))
    }

    async fn insert_one(&self, planet: &Planet) -> Result<()> {
        let document = PlanetDocument {
            id: planet.id.as_object_id(),
            name: planet.name.clone(),
        };
        self.collection.insert_one(document).await?;
        Ok(())
    }

    async fn update_name_by_id(&self, id: PlanetId, name: &str) -> Result<u64> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! { "$set": { "name": name } },
            )
            .await?;
        Ok(result.matched_count)
    }
}
