//! Foundation types for plasma object channels.
//!
//! This crate provides the identity and addressing types shared by the
//! store-client capability and the channel adapters. Every other crate in
//! the workspace depends on `plasma-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Fixed 20-byte opaque object identifier
//! - [`StoreLocation`] — Path/address of a store instance
//! - [`RoutingHint`] — Network endpoint owning an object (remote variant)
//! - [`ExpectedSize`] — Optional declared byte count, ≤ 0 meaning unknown

pub mod error;
pub mod location;
pub mod object;
pub mod size;

pub use error::TypeError;
pub use location::{RoutingHint, StoreLocation};
pub use object::ObjectId;
pub use size::ExpectedSize;
