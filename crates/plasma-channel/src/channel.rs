use bytes::Bytes;
use plasma_types::ObjectId;

use crate::error::ChannelResult;
use crate::read::ReadCursor;
use crate::write::WriteState;

/// Which phase a channel is opened for. Writing and reading are mutually
/// exclusive on one channel instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
}

/// Phase of a channel instance, carrying its store session while open.
///
/// `Unopened → Writing → Closed` or `Unopened → Reading → Closed`; the
/// session is created at open and released (dropped) at close.
pub(crate) enum ChannelState<S> {
    Unopened,
    Writing { session: S, writer: WriteState },
    Reading { session: S, cursor: ReadCursor },
    Closed,
}

/// Uniform streaming contract over a store object, local or remote.
///
/// Lifecycle: a channel opens once, for writing or for reading, and closes
/// once. Closing a write phase finalizes (seals) the object, the sole point
/// at which it becomes visible to readers; the underlying object is then
/// immutable. A closed channel is done — re-reading the same identifier
/// takes a fresh instance.
///
/// Implementations must satisfy these invariants:
/// - Writes are applied in call order at a monotonically advancing offset.
/// - A failed write or close leaves the object unsealed and invisible; no
///   partial state is observable through other channels.
/// - `close` is idempotent: a second call must not re-seal or re-transfer.
/// - No internal retries or timeouts; store failures surface unchanged.
pub trait ObjectChannel {
    /// Open the channel, establishing its store session.
    fn open(&mut self, mode: OpenMode) -> ChannelResult<()>;

    /// Write `data`, returning the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> ChannelResult<usize>;

    /// Read up to `count` bytes; an empty result means end of data.
    fn read(&mut self, count: usize) -> ChannelResult<Bytes>;

    /// Close the channel, sealing the object if it was open for writing.
    fn close(&mut self) -> ChannelResult<()>;

    /// Whether the object exists (sealed) in the store.
    fn exists(&self) -> ChannelResult<bool>;

    /// Remove the object from the store, where the variant supports it.
    fn delete(&mut self) -> ChannelResult<()>;

    /// The object's buffer size: the fixed allocation in direct mode, the
    /// total appended length in staged mode, or the materialized buffer
    /// length when reading. Zero while still unknown.
    fn size(&self) -> u64;

    /// Zero-copy view of the full sealed object, independent of the read
    /// cursor position.
    fn buffer(&self) -> ChannelResult<Bytes>;

    /// The identifier this channel is bound to.
    fn object_id(&self) -> ObjectId;

    /// Scheme-qualified address identifying the object to downstream
    /// consumers.
    fn data_url(&self) -> String;
}
