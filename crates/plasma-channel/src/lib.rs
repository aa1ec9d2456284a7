//! Buffered object channels over a plasma shared-memory object store.
//!
//! A channel binds a 20-byte [`ObjectId`](plasma_types::ObjectId) to a
//! create → write → seal → read → delete lifecycle behind one streaming
//! contract, the [`ObjectChannel`] trait. Two adapters implement it:
//!
//! - [`PlasmaChannel`] — against a directly-connected store session
//! - [`PlasmaFlightChannel`] — against a flight broker that resolves objects
//!   through an optional routing hint
//!
//! # Write Modes
//!
//! The store demands an object's exact size before any bytes are written,
//! as a single irrevocable allocation. [`WriteMode`] reconciles that with
//! callers that do not know their total size up front:
//!
//! - [`WriteMode::Direct`] — the first write allocates a fixed buffer
//!   (the declared expected size, or the first write's length). Writes fill
//!   it sequentially; overflowing it is an error.
//! - [`WriteMode::Staged`] — writes accumulate in a growable local buffer
//!   that is copied into the store in one bulk transfer at close, trading a
//!   full duplication for flexibility.
//!
//! Either way, close seals the object; only then does it become visible to
//! readers, and it is immutable from that point on.
//!
//! # Concurrency
//!
//! All calls are synchronous and blocking. A channel instance serves a
//! single logical writer or reader; callers serialize access externally.
//! Sealing is the only cross-channel synchronization point.

pub mod channel;
pub mod error;
pub mod flight;
pub mod local;
pub mod read;
pub mod write;

pub use channel::{ObjectChannel, OpenMode};
pub use error::{ChannelError, ChannelResult};
pub use flight::PlasmaFlightChannel;
pub use local::PlasmaChannel;
pub use write::WriteMode;
