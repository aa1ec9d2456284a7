use plasma_types::ObjectId;

/// Errors from store-client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The requested object is missing or not yet sealed.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// An allocation already exists for this identifier.
    #[error("object already exists: {0}")]
    AlreadyExists(ObjectId),

    /// The object is sealed and can no longer be written.
    #[error("object already sealed: {0}")]
    AlreadySealed(ObjectId),

    /// A write fell outside the fixed allocation.
    #[error("write of {len} bytes at offset {offset} exceeds allocation of {allocated} bytes for {id}")]
    OutOfRange {
        id: ObjectId,
        offset: u64,
        len: u64,
        allocated: u64,
    },

    /// Failed to establish a session with the store or broker.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Generic failure reported by the backing store.
    #[error("store backend error: {0}")]
    Backend(String),

    /// I/O error from the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
