//! Storage trait shared by every backend.

use async_trait::async_trait;

use super::entity::{Beer, Review};
use super::error::StorageResult;

/// Persistence contract for beers and reviews.
///
/// # Invariants
///
/// - No two stored beers share the same (name, brewery)
/// - Ids are assigned by the backend, unique and increasing per entity kind
/// - `created` is stamped by the backend at save time
/// - Stored records are never updated or removed
///
/// # Implementors
///
/// - [`super::MemoryStorage`] - process-local state
/// - [`super::JsonStorage`] - one JSON document on disk
#[async_trait]
pub trait Storage: Send + Sync {
    /// Save beers in order, returning the persisted records.
    ///
    /// Caller-supplied `id` and `created` are ignored. Processing stops at the
    /// first failure; beers saved before it remain saved.
    ///
    /// # Errors
    /// `DuplicateEntity` if a beer with the same (name, brewery) exists,
    /// `InvalidEntity` if a beer fails validation.
    async fn save_beer(&self, beers: &[Beer]) -> StorageResult<Vec<Beer>>;

    /// Save a review, returning the persisted record.
    ///
    /// Reviews have no uniqueness constraint.
    async fn save_review(&self, review: &Review) -> StorageResult<Review>;

    /// All beers in insertion order.
    async fn find_beers(&self) -> StorageResult<Vec<Beer>>;

    /// Beers whose id equals `filter.id`.
    ///
    /// # Errors
    /// `MissingKey` if `filter.id` is zero.
    async fn find_beer(&self, filter: &Beer) -> StorageResult<Vec<Beer>>;

    /// Reviews whose beer id equals `filter.beer_id`, in insertion order.
    ///
    /// # Errors
    /// `MissingKey` if `filter.beer_id` is zero.
    async fn find_review(&self, filter: &Review) -> StorageResult<Vec<Review>>;
}
