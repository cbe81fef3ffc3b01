//! Cellar - Beer Catalog Storage
//!
//! Save and query beers and their reviews through one [`Storage`] trait,
//! backed by process memory or a JSON file.
//!
//! # Usage
//!
//! ```rust
//! use cellar::{new_storage, Beer, Review, StorageConfig};
//!
//! tokio_test::block_on(async {
//!     let storage = new_storage(&StorageConfig::memory()).await.unwrap();
//!
//!     let saved = storage
//!         .save_beer(&[Beer::new("Tecate", "Cuahutemoc Moctezuma", 5.0, "Lager")])
//!         .await
//!         .unwrap();
//!     assert_eq!(saved[0].id, 1);
//!
//!     storage
//!         .save_review(&Review::new(saved[0].id, "John", "Doe", 3, "Fine."))
//!         .await
//!         .unwrap();
//!     let reviews = storage.find_review(&Review::for_beer(1)).await.unwrap();
//!     assert_eq!(reviews.len(), 1);
//! });
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;
pub mod sample;
pub mod storage;

pub use config::Config;
pub use storage::{
    new_storage, Beer, JsonStorage, MemoryStorage, Review, Storage, StorageConfig, StorageError,
    StorageKind, StorageResult,
};
