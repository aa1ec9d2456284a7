use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bytes::Bytes;
use plasma_types::{ObjectId, StoreLocation};

use crate::error::{ClientError, ClientResult};
use crate::traits::{ObjectWriter, StoreClient, StoreConnector};

/// An object slot: a fixed allocation being filled, or sealed data.
enum Slot {
    Unsealed(Vec<u8>),
    Sealed(Bytes),
}

/// In-memory, HashMap-based plasma store.
///
/// Intended for tests and embedding. Objects are held behind a `RwLock`;
/// sealed data is stored as [`Bytes`] so reads are zero-copy. Cloning the
/// store clones a handle to the same object table, which is how it doubles
/// as its own [`StoreConnector`].
#[derive(Clone)]
pub struct InMemoryPlasmaStore {
    objects: Arc<RwLock<HashMap<ObjectId, Slot>>>,
}

impl InMemoryPlasmaStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of objects currently allocated, sealed or not.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Remove all objects from the store.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// Returns `true` if an unsealed allocation exists for `id`.
    pub fn is_unsealed(&self, id: ObjectId) -> bool {
        matches!(
            self.objects.read().expect("lock poisoned").get(&id),
            Some(Slot::Unsealed(_))
        )
    }
}

impl Default for InMemoryPlasmaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectWriter for InMemoryPlasmaStore {
    fn create(&self, id: ObjectId, size: u64) -> ClientResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        if map.contains_key(&id) {
            return Err(ClientError::AlreadyExists(id));
        }
        map.insert(id, Slot::Unsealed(vec![0u8; size as usize]));
        Ok(())
    }

    fn write_at(&self, id: ObjectId, offset: u64, data: &[u8]) -> ClientResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        match map.get_mut(&id) {
            Some(Slot::Unsealed(buf)) => {
                let end = offset as usize + data.len();
                if end > buf.len() {
                    return Err(ClientError::OutOfRange {
                        id,
                        offset,
                        len: data.len() as u64,
                        allocated: buf.len() as u64,
                    });
                }
                buf[offset as usize..end].copy_from_slice(data);
                Ok(())
            }
            Some(Slot::Sealed(_)) => Err(ClientError::AlreadySealed(id)),
            None => Err(ClientError::NotFound(id)),
        }
    }

    fn seal(&self, id: ObjectId) -> ClientResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        match map.remove(&id) {
            Some(Slot::Unsealed(buf)) => {
                map.insert(id, Slot::Sealed(Bytes::from(buf)));
                Ok(())
            }
            Some(slot @ Slot::Sealed(_)) => {
                map.insert(id, slot);
                Err(ClientError::AlreadySealed(id))
            }
            None => Err(ClientError::NotFound(id)),
        }
    }

    fn put_raw_buffer(&self, data: &[u8], id: ObjectId) -> ClientResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        if map.contains_key(&id) {
            return Err(ClientError::AlreadyExists(id));
        }
        map.insert(id, Slot::Sealed(Bytes::copy_from_slice(data)));
        Ok(())
    }
}

impl StoreClient for InMemoryPlasmaStore {
    fn get_buffers(&self, ids: &[ObjectId]) -> ClientResult<Vec<Bytes>> {
        let map = self.objects.read().expect("lock poisoned");
        ids.iter()
            .map(|id| match map.get(id) {
                // Unsealed allocations are invisible to readers.
                Some(Slot::Sealed(data)) => Ok(data.clone()),
                _ => Err(ClientError::NotFound(*id)),
            })
            .collect()
    }

    fn list(&self) -> ClientResult<Vec<ObjectId>> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map
            .iter()
            .filter_map(|(id, slot)| match slot {
                Slot::Sealed(_) => Some(*id),
                Slot::Unsealed(_) => None,
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn delete(&self, ids: &[ObjectId]) -> ClientResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        for id in ids {
            map.remove(id);
        }
        Ok(())
    }
}

impl StoreConnector for InMemoryPlasmaStore {
    type Session = Self;

    fn connect(&self, _location: &StoreLocation) -> ClientResult<Self::Session> {
        Ok(self.clone())
    }
}

impl std::fmt::Debug for InMemoryPlasmaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryPlasmaStore")
            .field("object_count", &count)
            .finish()
    }
}
