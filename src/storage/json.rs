//! JsonStorage - File-backed backend
//!
//! TigerStyle: Same rules as the memory backend, state mirrored to one file.
//!
//! # Layout
//!
//! ```text
//! <data_dir>/cellar.json
//! {
//!   "version": 1,
//!   "beers":   [ { "id": 1, "name": ..., "created": ... }, ... ],
//!   "reviews": [ { "id": 1, "beer_id": 1, ... }, ... ]
//! }
//! ```
//!
//! The file is loaded once on open and rewritten after every save that changed
//! state (temp file, then rename).

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use crate::constants::{DATA_FILE_VERSION, JSON_FILE_NAME};

use super::backend::Storage;
use super::cellar::{Cellar, Checkpoint};
use super::entity::{Beer, Review};
use super::error::{StorageError, StorageResult};

// =============================================================================
// File Format
// =============================================================================

/// On-disk document, as read.
#[derive(Debug, Deserialize)]
struct CellarFile {
    /// Version for format checks
    version: u32,
    #[serde(default)]
    beers: Vec<Beer>,
    #[serde(default)]
    reviews: Vec<Review>,
}

/// On-disk document, as written.
#[derive(Debug, Serialize)]
struct CellarFileRef<'a> {
    version: u32,
    beers: &'a [Beer],
    reviews: &'a [Review],
}

// =============================================================================
// JsonStorage
// =============================================================================

/// JSON file storage backend.
#[derive(Debug)]
pub struct JsonStorage {
    /// Data file location
    path: PathBuf,
    /// Loaded state; the write lock also covers the file rewrite
    cellar: RwLock<Cellar>,
}

impl JsonStorage {
    /// Open or create the backend in `data_dir`.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created, the file cannot be
    /// read, or its content is not a valid cellar document.
    pub async fn open(data_dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(JSON_FILE_NAME);

        let cellar = match fs::read(&path).await {
            Ok(bytes) => decode(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Cellar::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            beers = cellar.beers().len(),
            reviews = cellar.reviews().len(),
            "Opened JSON storage"
        );

        Ok(Self {
            path,
            cellar: RwLock::new(cellar),
        })
    }

    /// Path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the cellar to disk.
    async fn persist(&self, cellar: &Cellar) -> StorageResult<()> {
        let document = CellarFileRef {
            version: DATA_FILE_VERSION,
            beers: cellar.beers(),
            reviews: cellar.reviews(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &bytes).await?;
        fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Persisted cellar");
        Ok(())
    }

    /// Write the cellar to disk, undoing inserts since `checkpoint` if that fails.
    ///
    /// Memory and file never disagree about what was saved.
    async fn commit(&self, cellar: &mut Cellar, checkpoint: Checkpoint) -> StorageResult<()> {
        if let Err(e) = self.persist(cellar).await {
            cellar.rollback(checkpoint);
            tracing::warn!(path = %self.path.display(), error = %e, "Rolled back unsaved changes");
            return Err(e);
        }
        Ok(())
    }
}

/// Parse a data file into a cellar.
fn decode(bytes: &[u8]) -> StorageResult<Cellar> {
    let file: CellarFile = serde_json::from_slice(bytes).map_err(StorageError::InvalidDataFile)?;
    if file.version != DATA_FILE_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: file.version,
            expected: DATA_FILE_VERSION,
        });
    }
    Cellar::from_parts(file.beers, file.reviews)
}

#[async_trait]
impl Storage for JsonStorage {
    async fn save_beer(&self, beers: &[Beer]) -> StorageResult<Vec<Beer>> {
        let mut cellar = self.cellar.write().await;
        let checkpoint = cellar.checkpoint();
        let (saved, outcome) = cellar.insert_beers(beers);

        // Beers saved before a duplicate stay saved, on disk too
        if !saved.is_empty() {
            self.commit(&mut cellar, checkpoint).await?;
        }

        for beer in &saved {
            tracing::info!(beer_id = beer.id, name = %beer.name, "Saved beer");
        }

        outcome.map(|()| saved)
    }

    async fn save_review(&self, review: &Review) -> StorageResult<Review> {
        let mut cellar = self.cellar.write().await;
        let checkpoint = cellar.checkpoint();
        let stored = cellar.insert_review(review)?;
        self.commit(&mut cellar, checkpoint).await?;

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
