//! Sample Data
//!
//! A small seed catalog for demos and manual testing.

use std::collections::HashMap;

use crate::storage::{Beer, Review, Storage, StorageError, StorageResult};

/// Seed beers.
#[must_use]
pub fn beers() -> Vec<Beer> {
    vec![
        Beer::new(
            "Pliny the Elder",
            "Russian River Brewing Company",
            8.0,
            "Pliny the Elder is brewed with Amarillo, Centennial, CTZ, and Simcoe hops. \
             It is well-balanced with malt, hops, and alcohol, slightly bitter with a fresh \
             hop aroma of floral, citrus, and pine.",
        ),
        Beer::new(
            "Oatmeal Stout",
            "Samuel Smith",
            5.0,
            "Brewed with well water (the original well at the Old Brewery, sunk in 1758, \
             is still in use), fermented in stone Yorkshire squares.",
        ),
        Beer::new(
            "Tecate",
            "Cuahutemoc Moctezuma",
            5.0,
            "Very smooth, medium bodied brew. Malt sweetness is thin, and can be likened \
             to diluted sugar water. Light citric hop flavours gently prick the palate.",
        ),
        Beer::new(
            "Bath Ale",
            "Hall & Woodhouse",
            4.5,
            "A golden amber ale with a fruity hop aroma and a crisp bitter finish.",
        ),
    ]
}

/// Seed reviews, keyed by the (name, brewery) of the beer they review.
#[must_use]
pub fn reviews() -> Vec<(&'static str, &'static str, Review)> {
    vec![
        (
            "Pliny the Elder",
            "Russian River Brewing Company",
            Review::new(0, "Wonder", "Woman", 8, "Nice beer."),
        ),
        (
            "Pliny the Elder",
            "Russian River Brewing Company",
            Review::new(0, "Bruce", "Wayne", 9, "Worth the trip to Santa Rosa."),
        ),
        (
            "Tecate",
            "Cuahutemoc Moctezuma",
            Review::new(0, "John", "Doe", 3, "Fine with lime."),
        ),
    ]
}

/// What a [`seed`] run added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Sample beers that were not already stored
    pub beers_added: usize,
    /// Reviews saved for those beers
    pub reviews_added: usize,
}

/// Save the sample catalog.
///
/// Beers already present are skipped, along with their reviews, so seeding
/// twice adds nothing the second time.
///
/// # Errors
/// Returns the first storage error other than a duplicate beer.
pub async fn seed(storage: &dyn Storage) -> StorageResult<SeedReport> {
    let mut report = SeedReport::default();
    let mut added: HashMap<(String, String), u64> = HashMap::new();

    for beer in beers() {
        match storage.save_beer(std::slice::from_ref(&beer)).await {
            Ok(saved) => {
                for stored in saved {
                    added.insert((stored.name, stored.brewery), stored.id);
                    report.beers_added += 1;
                }
            }
            Err(StorageError::DuplicateEntity) => {
                tracing::debug!(name = %beer.name, "Sample beer already present");
            }
            Err(e) => return Err(e),
        }
    }

    for (name, brewery, review) in reviews() {
        let Some(&beer_id) = added.get(&(name.to_string(), brewery.to_string())) else {
            continue;
        };
        storage
            .save_review(&Review { beer_id, ..review })
            .await?;
        report.reviews_added += 1;
    }

    tracing::info!(
        beers = report.beers_added,
        reviews = report.reviews_added,
        "Seeded sample data"
    );

    Ok(report)
}

// =============================================================================
// Tests
// =============================================================================
