use bytes::Bytes;
use plasma_types::{ObjectId, RoutingHint, StoreLocation};

use crate::error::ClientResult;

/// Write-side operations common to the local store and flight clients.
///
/// The store requires an object's exact size before any bytes are written:
/// `create` makes a single irrevocable allocation, `write_at` fills it
/// sequentially while unsealed, and `seal` makes it immutable and visible to
/// readers. `put_raw_buffer` is the bulk path: allocate, copy, and seal in
/// one operation.
pub trait ObjectWriter {
    /// Allocate a fixed-size object. Fails if the identifier already exists,
    /// sealed or not.
    fn create(&self, id: ObjectId, size: u64) -> ClientResult<()>;

    /// Copy `data` into an unsealed allocation at `offset`. The write must
    /// fall entirely inside the allocation.
    fn write_at(&self, id: ObjectId, offset: u64, data: &[u8]) -> ClientResult<()>;

    /// Finalize an object, making it immutable and visible to readers.
    fn seal(&self, id: ObjectId) -> ClientResult<()>;

    /// Allocate, copy `data`, and seal in a single operation.
    fn put_raw_buffer(&self, data: &[u8], id: ObjectId) -> ClientResult<()>;
}

/// Session against a directly-connected plasma store.
///
/// All implementations must satisfy these invariants:
/// - Sealed objects are immutable; concurrent reads are always safe.
/// - Only sealed objects appear in `list` or are returned by `get_buffers`;
///   fetching a missing or unsealed object is an error.
/// - The store never interprets object contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait StoreClient: ObjectWriter + Send + Sync {
    /// Fetch the buffers for the given identifiers, in order. Zero-copy
    /// views; cloning the returned [`Bytes`] does not duplicate the data.
    fn get_buffers(&self, ids: &[ObjectId]) -> ClientResult<Vec<Bytes>>;

    /// List the identifiers of all sealed objects in the store.
    fn list(&self) -> ClientResult<Vec<ObjectId>>;

    /// Remove objects from the store. Missing identifiers are ignored.
    fn delete(&self, ids: &[ObjectId]) -> ClientResult<()>;
}

/// Session against a flight broker that may forward to a remote store.
///
/// Reads and existence checks carry an optional [`RoutingHint`] naming the
/// endpoint that owns the object; without a hint the broker falls back to
/// the store it is directly attached to. Writes always target the attached
/// store.
pub trait FlightClient: ObjectWriter + Send + Sync {
    /// Fetch a sealed object's buffer, resolving `hint` to locate the
    /// owning store.
    fn get_buffer(&self, id: ObjectId, hint: Option<&RoutingHint>) -> ClientResult<Bytes>;

    /// Check whether a sealed object exists at the hinted endpoint.
    fn exists(&self, id: ObjectId, hint: Option<&RoutingHint>) -> ClientResult<bool>;
}

/// Factory for [`StoreClient`] sessions.
///
/// Each channel instance connects its own session at open and releases it at
/// close; there is no ambient shared client.
pub trait StoreConnector {
    type Session: StoreClient;

    /// Establish a session against the store at `location`.
    fn connect(&self, location: &StoreLocation) -> ClientResult<Self::Session>;
}

/// Factory for [`FlightClient`] sessions.
pub trait FlightConnector {
    type Session: FlightClient;

    /// Establish a session against the broker at `location`.
    fn connect(&self, location: &StoreLocation) -> ClientResult<Self::Session>;
}
