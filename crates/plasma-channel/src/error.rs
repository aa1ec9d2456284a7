use plasma_client::ClientError;
use plasma_types::ObjectId;
use thiserror::Error;

/// Errors from channel operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A direct-mode write would exceed the fixed allocation.
    ///
    /// Always fatal to the write; the object stays unsealed. Recover by
    /// reopening under a new identifier in staged mode or with a declared
    /// expected size.
    #[error(
        "attempted to write {attempted} bytes to plasma buffer of size {allocated}, \
         consider using staged mode or declaring an expected size"
    )]
    Overflow { attempted: u64, allocated: u64 },

    /// The object is missing or not yet sealed.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The channel is not open for writing.
    #[error("channel is not open for writing")]
    NotWritable,

    /// The channel is not open for reading.
    #[error("channel is not open for reading")]
    NotReadable,

    /// The channel was already opened; one instance serves one open phase.
    #[error("channel already opened")]
    AlreadyOpen,

    /// Failure surfaced unchanged from the backing store client.
    #[error("store error: {0}")]
    Store(#[source] ClientError),
}

impl From<ClientError> for ChannelError {
    fn from(err: ClientError) -> Self {
        // Keep "not found" distinguishable from generic store failure.
        match err {
            ClientError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Result alias for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;
