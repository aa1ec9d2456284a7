//! Store-client capability for plasma object channels.
//!
//! The shared-memory object store engine and the flight broker are external
//! collaborators; this crate defines the narrow client surface the channel
//! layer consumes, plus in-memory implementations for tests and embedding.
//!
//! # Capability Traits
//!
//! - [`ObjectWriter`] — create/write/seal operations common to both clients
//! - [`StoreClient`] — directly-connected store session (list, fetch, delete)
//! - [`FlightClient`] — network session resolving objects via a routing hint
//! - [`StoreConnector`] / [`FlightConnector`] — session factories, one
//!   session per channel instance
//!
//! # Store Semantics
//!
//! An object is allocated with a fixed size before any bytes are written,
//! then sealed exactly once. Only sealed objects are visible to readers and
//! listings; a sealed object is immutable and may be read concurrently.
//!
//! # In-Memory Backends
//!
//! - [`InMemoryPlasmaStore`] — `HashMap`-based store for tests and embedding
//! - [`InMemoryFlightClient`] — fronts a local store plus a routing table of
//!   remote stores

pub mod error;
pub mod flight;
pub mod memory;
pub mod traits;

pub use error::{ClientError, ClientResult};
pub use flight::InMemoryFlightClient;
pub use memory::InMemoryPlasmaStore;
pub use traits::{FlightClient, FlightConnector, ObjectWriter, StoreClient, StoreConnector};
