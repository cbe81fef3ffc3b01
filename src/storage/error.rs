//! Storage errors.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by every storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A beer with the same (name, brewery) is already stored.
    #[error("beer already exists")]
    DuplicateEntity,

    /// A find was called without the identifying field.
    #[error("no beer ID specified")]
    MissingKey,

    /// The requested backend kind is not known.
    #[error("unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    /// The record failed validation before saving.
    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    /// Reading or writing the data file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The cellar could not be encoded for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The data file exists but could not be parsed.
    #[error("invalid data file: {0}")]
    InvalidDataFile(serde_json::Error),

    /// The data file breaks a cellar invariant (zero or repeated id,
    /// repeated beer key).
    #[error("corrupt data file: {0}")]
    CorruptDataFile(String),

    /// The data file was written by an incompatible format version.
    #[error("unsupported data file version: {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
