//! Entity - Beers and Reviews
//!
//! TigerStyle: Explicit types, zero values mean "unset".
//!
//! A zero-valued record doubles as a filter record: `Beer { id: 7, ..Default::default() }`
//! selects the beer with id 7.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    BEER_BREWERY_BYTES_MAX, BEER_NAME_BYTES_MAX, REVIEW_NAME_BYTES_MAX, REVIEW_TEXT_BYTES_MAX,
};

use super::error::{StorageError, StorageResult};

// =============================================================================
// Beer
// =============================================================================

/// A beer in the cellar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    /// Backend-assigned identifier (0 until saved)
    pub id: u64,
    /// Display name
    pub name: String,
    /// Brewery that makes it
    pub brewery: String,
    /// Alcohol by volume
    pub abv: f32,
    /// Free-text description
    pub short_desc: String,
    /// When the backend saved it
    pub created: DateTime<Utc>,
}

impl Beer {
    /// Create an unsaved beer.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        brewery: impl Into<String>,
        abv: f32,
        short_desc: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            brewery: brewery.into(),
            abv,
            short_desc: short_desc.into(),
            ..Self::default()
        }
    }

    /// Filter record selecting a single beer by id.
    #[must_use]
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// True when both beers share the duplicate key (name, brewery).
    ///
    /// Comparison is exact and case-sensitive.
    #[must_use]
    pub fn same_key(&self, other: &Beer) -> bool {
        self.name == other.name && self.brewery == other.brewery
    }

    /// Check the identity fields before saving.
    ///
    /// # Errors
    /// Returns `InvalidEntity` if name or brewery is empty or too long.
    pub fn validate(&self) -> StorageResult<()> {
        if self.name.is_empty() {
            return Err(StorageError::InvalidEntity("beer name cannot be empty".into()));
        }
        if self.brewery.is_empty() {
            return Err(StorageError::InvalidEntity(
                "beer brewery cannot be empty".into(),
            ));
        }
        if self.name.len() > BEER_NAME_BYTES_MAX {
            return Err(StorageError::InvalidEntity(format!(
                "beer name {} bytes exceeds max {}",
                self.name.len(),
                BEER_NAME_BYTES_MAX
            )));
        }
        if self.brewery.len() > BEER_BREWERY_BYTES_MAX {
            return Err(StorageError::InvalidEntity(format!(
                "beer brewery {} bytes exceeds max {}",
                self.brewery.len(),
                BEER_BREWERY_BYTES_MAX
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Review
// =============================================================================

/// A review of a beer.
///
/// `beer_id` is not checked against the cellar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Backend-assigned identifier (0 until saved)
    pub id: u64,
    /// Beer being reviewed (0 = not specified)
    pub beer_id: u64,
    /// Reviewer first name
    pub first_name: String,
    /// Reviewer last name
    pub last_name: String,
    /// Rating
    pub score: u32,
    /// Review body
    pub text: String,
    /// When the backend saved it
    pub created: DateTime<Utc>,
}

impl Review {
    /// Create an unsaved review.
    #[must_use]
    pub fn new(
        beer_id: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        score: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            beer_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            score,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Filter record selecting every review of a beer.
    #[must_use]
    pub fn for_beer(beer_id: u64) -> Self {
        Self {
            beer_id,
            ..Self::default()
        }
    }

    /// Check free-text fields against their limits.
    ///
    /// # Errors
    /// Returns `InvalidEntity` if a field is too long.
    pub fn validate(&self) -> StorageResult<()> {
        for (field, value) in [("first name", &self.first_name), ("last name", &self.last_name)] {
            if value.len() > REVIEW_NAME_BYTES_MAX {
                return Err(StorageError::InvalidEntity(format!(
                    "review {field} {} bytes exceeds max {}",
                    value.len(),
                    REVIEW_NAME_BYTES_MAX
                )));
            }
        }
        if self.text.len() > REVIEW_TEXT_BYTES_MAX {
            return Err(StorageError::InvalidEntity(format!(
                "review text {} bytes exceeds max {}",
                self.text.len(),
                REVIEW_TEXT_BYTES_MAX
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
