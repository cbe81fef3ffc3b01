//! TigerStyle Constants
//!
//! Limits carry their unit in the name.

/// Application name
pub const APP_NAME: &str = "cellar";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Data file name inside the data directory
pub const JSON_FILE_NAME: &str = "cellar.json";

/// Data file format version
pub const DATA_FILE_VERSION: u32 = 1;

/// Default data directory (tilde-expanded)
pub const DATA_DIR_DEFAULT: &str = "~/.cellar";

/// Environment variable selecting the backend
pub const ENV_STORAGE: &str = "CELLAR_STORAGE";

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "CELLAR_DATA_DIR";

/// Maximum beer name length in bytes
pub const BEER_NAME_BYTES_MAX: usize = 256;

/// Maximum brewery name length in bytes
pub const BEER_BREWERY_BYTES_MAX: usize = 256;

/// Maximum reviewer first/last name length in bytes
pub const REVIEW_NAME_BYTES_MAX: usize = 128;

/// Maximum review text length in bytes
pub const REVIEW_TEXT_BYTES_MAX: usize = 10_000;
