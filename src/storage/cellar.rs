//! Cellar - Shared State and Rules
//!
//! TigerStyle: One place for identity assignment, duplicate detection and
//! filtering, so every backend answers the same way.
//!
//! Backends wrap a `Cellar` in a lock; the JSON backend also writes it to disk.

use std::collections::HashSet;

use chrono::Utc;

use super::entity::{Beer, Review};
use super::error::{StorageError, StorageResult};

/// Collection sizes and counters at a point in time, for undoing inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    beers: usize,
    reviews: usize,
    last_beer_id: u64,
    last_review_id: u64,
}

/// Ordered beer and review collections with per-kind id counters.
#[derive(Debug, Default)]
pub(crate) struct Cellar {
    /// Beers in insertion order
    beers: Vec<Beer>,
    /// Reviews in insertion order
    reviews: Vec<Review>,
    /// Highest beer id handed out so far
    last_beer_id: u64,
    /// Highest review id handed out so far
    last_review_id: u64,
}

impl Cellar {
    /// Create an empty cellar.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cellar from stored records.
    ///
    /// Id assignment continues after the greatest stored id of each kind.
    ///
    /// # Errors
    /// Returns `CorruptDataFile` if the records break a cellar invariant:
    /// a zero or repeated id, or two beers sharing (name, brewery).
    pub(crate) fn from_parts(beers: Vec<Beer>, reviews: Vec<Review>) -> StorageResult<Self> {
        let mut beer_ids = HashSet::with_capacity(beers.len());
        let mut beer_keys = HashSet::with_capacity(beers.len());
        for beer in &beers {
            if beer.id == 0 {
                return Err(StorageError::CorruptDataFile(format!(
                    "beer {:?} has no id",
                    beer.name
                )));
            }
            if !beer_ids.insert(beer.id) {
                return Err(StorageError::CorruptDataFile(format!(
                    "beer id {} is repeated",
                    beer.id
                )));
            }
            if !beer_keys.insert((beer.name.as_str(), beer.brewery.as_str())) {
                return Err(StorageError::CorruptDataFile(format!(
                    "beer {:?} by {:?} is repeated",
                    beer.name, beer.brewery
                )));
            }
        }
        drop(beer_keys);

        let mut review_ids = HashSet::with_capacity(reviews.len());
        for review in &reviews {
            if review.id == 0 {
                return Err(StorageError::CorruptDataFile(format!(
                    "review of beer {} has no id",
                    review.beer_id
                )));
            }
            if !review_ids.insert(review.id) {
                return Err(StorageError::CorruptDataFile(format!(
                    "review id {} is repeated",
                    review.id
                )));
            }
        }

        let last_beer_id = beer_ids.into_iter().max().unwrap_or(0);
        let last_review_id = review_ids.into_iter().max().unwrap_or(0);

        Ok(Self {
            beers,
            reviews,
            last_beer_id,
            last_review_id,
        })
    }

    /// Record the current state so later inserts can be undone.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            beers: self.beers.len(),
            reviews: self.reviews.len(),
            last_beer_id: self.last_beer_id,
            last_review_id: self.last_review_id,
        }
    }

    /// Undo every insert made since `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.beers.truncate(checkpoint.beers);
        self.reviews.truncate(checkpoint.reviews);
        self.last_beer_id = checkpoint.last_beer_id;
        self.last_review_id = checkpoint.last_review_id;
    }

    pub(crate) fn beers(&self) -> &[Beer] {
        &self.beers
    }

    pub(crate) fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Insert one beer, assigning id and timestamp.
    pub(crate) fn insert_beer(&mut self, beer: &Beer) -> StorageResult<Beer> {
        beer.validate()?;

        if self.beers.iter().any(|stored| stored.same_key(beer)) {
            tracing::warn!(
                name = %beer.name,
                brewery = %beer.brewery,
                "Rejected duplicate beer"
            );
            return Err(StorageError::DuplicateEntity);
        }

        self.last_beer_id += 1;
        let stored = Beer {
            id: self.last_beer_id,
            created: Utc::now(),
            ..beer.clone()
        };
        self.beers.push(stored.clone());

        // Postcondition
        debug_assert!(stored.id > 0, "saved beer must have id");

        Ok(stored)
    }

    /// Insert beers in order, stopping at the first failure.
    ///
    /// Returns the beers saved before any failure along with the outcome;
    /// saved beers are kept even when the outcome is an error.
    pub(crate) fn insert_beers(&mut self, beers: &[Beer]) -> (Vec<Beer>, StorageResult<()>) {
        let mut saved = Vec::with_capacity(beers.len());
        for beer in beers {
            match self.insert_beer(beer) {
                Ok(stored) => saved.push(stored),
                Err(e) => return (saved, Err(e)),
            }
        }
        (saved, Ok(()))
    }

    /// Insert one review, assigning id and timestamp.
    pub(crate) fn insert_review(&mut self, review: &Review) -> StorageResult<Review> {
        review.validate()?;

        self.last_review_id += 1;
        let stored = Review {
            id: self.last_review_id,
            created: Utc::now(),
            ..review.clone()
        };
        self.reviews.push(stored.clone());

        // Postcondition
        debug_assert!(stored.id > 0, "saved review must have id");

        Ok(stored)
    }

    /// Beers matching `filter.id`.
    pub(crate) fn find_beer(&self, filter: &Beer) -> StorageResult<Vec<Beer>> {
        if filter.id == 0 {
            return Err(StorageError::MissingKey);
        }
        Ok(self
            .beers
            .iter()
            .filter(|b| b.id == filter.id)
            .cloned()
            .collect())
    }

    /// Reviews matching `filter.beer_id`, in insertion order.
    pub(crate) fn find_review(&self, filter: &Review) -> StorageResult<Vec<Review>> {
        if filter.beer_id == 0 {
            return Err(StorageError::MissingKey);
        }
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.beer_id == filter.beer_id)
            .cloned()
            .collect())
    }

    /// Push a beer as-is, bypassing id assignment. Test fixtures only.
    #[cfg(test)]
    pub(crate) fn push_beer_raw(&mut self, beer: Beer) {
        self.last_beer_id = self.last_beer_id.max(beer.id);
        self.beers.push(beer);
    }

    /// Push a review as-is, bypassing id assignment. Test fixtures only.
    #[cfg(test)]
    pub(crate) fn push_review_raw(&mut self, review: Review) {
        self.last_review_id = self.last_review_id.max(review.id);
        self.reviews.push(review);
    }
}

// =============================================================================
// Tests
// =============================================================================
