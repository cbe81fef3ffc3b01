//! Configuration
//!
//! TigerStyle: Environment first (`.env` honoured), CLI flags override.
//!
//! | Variable          | Default     |
//! |-------------------|-------------|
//! | `CELLAR_STORAGE`  | `memory`    |
//! | `CELLAR_DATA_DIR` | `~/.cellar` |

use std::path::PathBuf;

use crate::constants::{DATA_DIR_DEFAULT, ENV_DATA_DIR, ENV_STORAGE};
use crate::storage::{StorageConfig, StorageKind, StorageResult};

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend to use
    pub storage: StorageKind,
    /// Data directory (tilde already expanded)
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            data_dir: expand_dir(DATA_DIR_DEFAULT),
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    ///
    /// # Errors
    /// Returns `UnsupportedBackend` if `CELLAR_STORAGE` names an unknown backend.
    pub fn from_env() -> StorageResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source. Empty values count as unset.
    ///
    /// # Errors
    /// Returns `UnsupportedBackend` if the storage variable names an unknown backend.
    pub fn from_lookup<F>(lookup: F) -> StorageResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match get(ENV_STORAGE) {
            Some(value) => value.parse()?,
            None => StorageKind::default(),
        };
        let data_dir = get(ENV_DATA_DIR)
            .map(|dir| expand_dir(&dir))
            .unwrap_or_else(|| expand_dir(DATA_DIR_DEFAULT));

        Ok(Self { storage, data_dir })
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, storage: Option<StorageKind>, data_dir: Option<&str>) -> Self {
        if let Some(storage) = storage {
            self.storage = storage;
        }
        if let Some(dir) = data_dir {
            self.data_dir = expand_dir(dir);
        }
        self
    }

    /// Factory input for this configuration.
    #[must_use]
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            kind: self.storage,
            data_dir: self.data_dir.clone(),
        }
    }
}

fn expand_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).into_owned())
}

// =============================================================================
// Tests
// =============================================================================
