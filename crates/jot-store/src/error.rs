/// Errors from persistence backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A family document could not be encoded or decoded.
    #[error("serialization error for family {family:?}: {source}")]
    Serialization {
        family: String,
        #[source]
        source: serde_json::Error,
    },

    /// The family name cannot be used as a file name.
    #[error("invalid family name: {0:?}")]
    InvalidFamily(String),
}

/// Result alias for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;
