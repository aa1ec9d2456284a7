use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bytes::Bytes;
use plasma_types::{ObjectId, RoutingHint, StoreLocation};

use crate::error::{ClientError, ClientResult};
use crate::memory::InMemoryPlasmaStore;
use crate::traits::{FlightClient, FlightConnector, ObjectWriter, StoreClient};

/// In-memory flight client: a local store plus a routing table of remotes.
///
/// Models the broker topology the flight protocol exposes: writes always
/// land in the store the client is attached to, while reads and existence
/// checks resolve an optional [`RoutingHint`] to the store owning the
/// object. Cloning shares both the attached store and the routing table.
#[derive(Clone)]
pub struct InMemoryFlightClient {
    local: InMemoryPlasmaStore,
    remotes: Arc<RwLock<HashMap<RoutingHint, InMemoryPlasmaStore>>>,
}

impl InMemoryFlightClient {
    /// Create a flight client attached to the given store.
    pub fn new(local: InMemoryPlasmaStore) -> Self {
        Self {
            local,
            remotes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a remote store under a routing hint.
    pub fn add_remote(&self, hint: RoutingHint, store: InMemoryPlasmaStore) {
        self.remotes
            .write()
            .expect("lock poisoned")
            .insert(hint, store);
    }

    /// The store this client is directly attached to.
    pub fn local_store(&self) -> &InMemoryPlasmaStore {
        &self.local
    }

    fn resolve(&self, hint: Option<&RoutingHint>) -> ClientResult<InMemoryPlasmaStore> {
        match hint {
            None => Ok(self.local.clone()),
            Some(hint) => self
                .remotes
                .read()
                .expect("lock poisoned")
                .get(hint)
                .cloned()
                .ok_or_else(|| ClientError::Connect(format!("unknown endpoint: {hint}"))),
        }
    }
}

impl ObjectWriter for InMemoryFlightClient {
    fn create(&self, id: ObjectId, size: u64) -> ClientResult<()> {
        self.local.create(id, size)
    }

    fn write_at(&self, id: ObjectId, offset: u64, data: &[u8]) -> ClientResult<()> {
        self.local.write_at(id, offset, data)
    }

    fn seal(&self, id: ObjectId) -> ClientResult<()> {
        self.local.seal(id)
    }

    fn put_raw_buffer(&self, data: &[u8], id: ObjectId) -> ClientResult<()> {
        self.local.put_raw_buffer(data, id)
    }
}

impl FlightClient for InMemoryFlightClient {
    fn get_buffer(&self, id: ObjectId, hint: Option<&RoutingHint>) -> ClientResult<Bytes> {
        let store = self.resolve(hint)?;
        let mut buffers = store.get_buffers(&[id])?;
        buffers.pop().ok_or(ClientError::NotFound(id))
    }

    fn exists(&self, id: ObjectId, hint: Option<&RoutingHint>) -> ClientResult<bool> {
        let store = self.resolve(hint)?;
        Ok(store.list()?.contains(&id))
    }
}

impl FlightConnector for InMemoryFlightClient {
    type Session = Self;

    fn connect(&self, _location: &StoreLocation) -> ClientResult<Self::Session> {
        Ok(self.clone())
    }
}

impl std::fmt::Debug for InMemoryFlightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let remotes = self.remotes.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryFlightClient")
            .field("local", &self.local)
            .field("remote_count", &remotes)
            .finish()
    }
}
