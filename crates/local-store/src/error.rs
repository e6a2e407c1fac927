use thiserror::Error;

/// Errors that can occur when persisting the local store.
///
/// Reads never produce errors; absent or malformed data substitutes a
/// default value instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be written.
    #[error("failed to write store file: {0}")]
    FileWrite(#[source] std::io::Error),

    /// A value could not be serialized for persistence.
    #[error("failed to serialize store value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
