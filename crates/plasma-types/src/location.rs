use std::fmt;

use serde::{Deserialize, Serialize};

/// Path or address identifying which store instance to connect to.
///
/// For a local store this is the socket file path visible to all sharing
/// processes; the value is opaque to the channel layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreLocation(String);

impl StoreLocation {
    /// Create a location from a path or address string.
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// The location as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StoreLocation {
    /// The conventional local store socket path.
    fn default() -> Self {
        Self("/tmp/plasma".into())
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StoreLocation {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StoreLocation {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Network endpoint owning an object in the remote variant.
///
/// The flight client resolves the hint to find the store instance holding a
/// given object. Absent a hint, the client falls back to its own store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingHint(String);

impl RoutingHint {
    /// Create a hint from an endpoint string (e.g. `host:port`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    /// The endpoint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutingHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoutingHint {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
