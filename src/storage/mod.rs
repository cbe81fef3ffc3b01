//! Storage - Contract, Backends and Factory
//!
//! TigerStyle: One trait, interchangeable backends, explicit construction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Storage Trait                         │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │  MemoryStorage  │           │   JsonStorage   │
//! │ (process-local) │           │  (cellar.json)  │
//! └────────┬────────┘           └────────┬────────┘
//!          └──────────────┬──────────────┘
//!                 ┌───────┴───────┐
//!                 │    Cellar     │  ids, duplicates, filters
//!                 └───────────────┘
//! ```
//!
//! Backends are built by [`new_storage`] from a [`StorageConfig`]; there is no
//! global instance.

mod backend;
mod cellar;
mod entity;
mod error;
mod json;
mod memory;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub use backend::Storage;
pub use entity::{Beer, Review};
pub use error::{StorageError, StorageResult};
pub use json::JsonStorage;
pub use memory::MemoryStorage;

// =============================================================================
// Backend Selection
// =============================================================================

/// Available storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageKind {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// JSON file in the data directory
    Json,
}

impl StorageKind {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Json => "json",
        }
    }
}

impl FromStr for StorageKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            _ => Err(StorageError::UnsupportedBackend(s.to_string())),
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What [`new_storage`] needs to build a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend to build
    pub kind: StorageKind,
    /// Directory holding the data file (JSON only)
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Memory backend config.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            kind: StorageKind::Memory,
            data_dir: PathBuf::new(),
        }
    }

    /// JSON backend config rooted at `data_dir`.
    #[must_use]
    pub fn json(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: StorageKind::Json,
            data_dir: data_dir.into(),
        }
    }
}

/// Build a backend.
///
/// # Errors
/// Returns error if the JSON backend cannot open its data file.
pub async fn new_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    tracing::info!(backend = %config.kind, "Creating storage");

    match config.kind {
        StorageKind::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageKind::Json => Ok(Arc::new(JsonStorage::open(&config.data_dir).await?)),
    }
}

// =============================================================================
// Tests
// =============================================================================
