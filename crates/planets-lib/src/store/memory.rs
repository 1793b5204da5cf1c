use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::planet::{Planet, PlanetId};
use crate::store::DocumentStore;

/// In-process [`DocumentStore`] used for local runs and tests.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    planets: RwLock<HashMap<PlanetId, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.planets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.planets.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>> {
        let planets = self.planets.read().await;
        Ok(planets.get(&id).map(|name| Planet {
            id,
            name: name.clone(),
        }))
    }

    async fn insert_one(&self, planet: &Planet) -> Result<()> {
        self.planets
            .write()
            .await
            .insert(planet.id, planet.name.clone());
        Ok(())
    }

    async fn update_name_by_id(&self, id: PlanetId, name: &str) -> Result<u64> {
        let mut planets = self.planets.write().await;
        match planets.get_mut(&id) {
            Some(stored) => {
                *stored = name.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_reports_matched_count() {
        let store = MemoryStore::new();
        let planet = Planet {
            id: PlanetId::generate(),
            name: "Mars".to_string(),
        };
        store.insert_one(&planet).await.unwrap();

        assert_eq!(store.update_name_by_id(planet.id, "New Mars").await.unwrap(), 1);
        assert_eq!(
            store
                .update_name_by_id(PlanetId::generate(), "Nowhere")
                .await
                .unwrap(),
            0
        );

        let found = store.find_by_id(planet.id).await.unwrap().unwrap();
        assert_eq!(found.name, "New Mars");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        assert!(store.find_by_id(PlanetId::nil()).await.unwrap().is_none());
    }
}
