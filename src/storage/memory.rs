//! MemoryStorage - Process-local backend
//!
//! TigerStyle: Reference semantics for every other backend.
//!
//! State lives only as long as the instance. Saves hold the write lock for the
//! whole check-assign-append sequence; finds share the read lock.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::Storage;
use super::cellar::Cellar;
use super::entity::{Beer, Review};
use super::error::StorageResult;

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cellar: RwLock<Cellar>,
}

impl MemoryStorage {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cellar: RwLock::new(Cellar::new()),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save_beer(&self, beers: &[Beer]) -> StorageResult<Vec<Beer>> {
        let mut cellar = self.cellar.write().await;
        let (saved, outcome) = cellar.insert_beers(beers);

        for beer in &saved {
            tracing::info!(beer_id = beer.id, name = %beer.name, "Saved beer");
        }

        outcome.map(|()| saved)
    }

    async fn save_review(&self, review: &Review) -> StorageResult<Review> {
        let stored = self.cellar.write().await.insert_review(review)?;
        tracing::info!(
            review_id = stored.id,
            beer_id = stored.beer_id,
            "Saved review"
        );
        Ok(stored)
    }

    async fn find_beers(&self) -> StorageResult<Vec<Beer>> {
        let beers = self.cellar.read().await.beers().to_vec();
        tracing::debug!(count = beers.len(), "Found beers");
        Ok(beers)
    }

    async fn find_beer(&self, filter: &Beer) -> StorageResult<Vec<Beer>> {
        let found = self.cellar.read().await.find_beer(filter)?;
        tracing::debug!(beer_id = filter.id, count = found.len(), "Found beer");
        Ok(found)
    }

    async fn find_review(&self, filter: &Review) -> StorageResult<Vec<Review>> {
        let found = self.cellar.read().await.find_review(filter)?;
        tracing::debug!(beer_id = filter.beer_id, count = found.len(), "Found reviews");
        Ok(found)
    }
}

// =============================================================================
// Tests
// =============================================================================
