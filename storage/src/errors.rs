// storage/src/errors.rs

pub use thiserror::Error;

/// A storage-level failure. Not-found is not represented here: an absent row
/// is an `Ok(None)` / zero-count outcome, never an error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying statement failed (connectivity, constraint violation,
    /// malformed statement).
    #[error("storage operation failed: {0}")]
    Storage(#[from] rusqlite::Error),
    /// The caller-supplied field mapping cannot be bound to the patient
    /// table (missing or unknown columns, unrepresentable values).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// The connection handle could not be acquired.
    #[error("failed to acquire connection: {0}")]
    Lock(String),
}

/// A type alias for a `Result` that returns a `StorageError` on failure.
pub type StorageResult<T> = Result<T, StorageError>;
