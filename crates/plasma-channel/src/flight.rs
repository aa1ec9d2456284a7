use bytes::Bytes;
use plasma_client::{FlightClient, FlightConnector};
use plasma_types::{ExpectedSize, ObjectId, RoutingHint, StoreLocation};

use crate::channel::{ChannelState, ObjectChannel, OpenMode};
use crate::error::{ChannelError, ChannelResult};
use crate::read::ReadCursor;
use crate::write::{WriteMode, WriteState};

/// Channel over a flight broker that may forward to a remote store.
///
/// Same contract as [`PlasmaChannel`](crate::PlasmaChannel), with objects
/// resolved through an optional [`RoutingHint`] naming the owning endpoint.
/// Two deliberate deviations from the local adapter:
///
/// - `delete` is a no-op: deletion of remotely-owned objects is not
///   supported by the protocol. Documented limitation, not an error.
/// - A direct-mode close whose written byte count differs from the declared
///   expected size logs a diagnostic and seals anyway; partial writes under
///   network conditions are left to the caller's own retry logic.
pub struct PlasmaFlightChannel<C: FlightConnector> {
    connector: C,
    location: StoreLocation,
    routing: Option<RoutingHint>,
    object_id: ObjectId,
    expected_size: ExpectedSize,
    mode: WriteMode,
    state: ChannelState<C::Session>,
    sealed_size: u64,
}

impl<C: FlightConnector> PlasmaFlightChannel<C> {
    /// Create an unopened channel bound to `object_id`, in direct mode with
    /// no declared size and no routing hint.
    pub fn new(connector: C, location: StoreLocation, object_id: ObjectId) -> Self {
        Self {
            connector,
            location,
            routing: None,
            object_id,
            expected_size: ExpectedSize::unknown(),
            mode: WriteMode::default(),
            state: ChannelState::Unopened,
            sealed_size: 0,
        }
    }

    /// Name the endpoint owning the object, for reads and existence checks.
    pub fn with_routing_hint(mut self, hint: RoutingHint) -> Self {
        self.routing = Some(hint);
        self
    }

    /// Declare the total size to be written.
    pub fn with_expected_size(mut self, expected_size: ExpectedSize) -> Self {
        self.expected_size = expected_size;
        self
    }

    /// Select the write mode. Resolved once; fixed for the channel's life.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    fn with_session<T>(&self, op: impl FnOnce(&C::Session) -> ChannelResult<T>) -> ChannelResult<T> {
        match &self.state {
            ChannelState::Writing { session, .. } | ChannelState::Reading { session, .. } => {
                op(session)
            }
            _ => {
                let session = self.connector.connect(&self.location)?;
                op(&session)
            }
        }
    }
}

impl<C: FlightConnector> ObjectChannel for PlasmaFlightChannel<C> {
    fn open(&mut self, mode: OpenMode) -> ChannelResult<()> {
        if !matches!(self.state, ChannelState::Unopened) {
            return Err(ChannelError::AlreadyOpen);
        }
        let session = self.connector.connect(&self.location)?;
        self.state = match mode {
            OpenMode::Write => ChannelState::Writing {
                session,
                writer: WriteState::new(self.mode),
            },
            OpenMode::Read => ChannelState::Reading {
                session,
                cursor: ReadCursor::new(),
            },
        };
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> ChannelResult<usize> {
        match &mut self.state {
            ChannelState::Writing { session, writer } => {
                if writer.is_staged() && writer.bytes_written() == 0 {
                    tracing::warn!(
                        object = %self.object_id,
                        "using dynamically sized plasma buffer, performance may be reduced"
                    );
                }
                writer.write(session, self.object_id, self.expected_size, data)
            }
            _ => Err(ChannelError::NotWritable),
        }
    }

    fn read(&mut self, count: usize) -> ChannelResult<Bytes> {
        let object_id = self.object_id;
        let routing = self.routing.clone();
        match &mut self.state {
            ChannelState::Reading { session, cursor } => cursor.read(count, || {
                Ok(session.get_buffer(object_id, routing.as_ref())?)
            }),
            _ => Err(ChannelError::NotReadable),
        }
    }

    fn close(&mut self) -> ChannelResult<()> {
        match std::mem::replace(&mut self.state, ChannelState::Closed) {
            ChannelState::Writing { session, writer } => {
                self.sealed_size =
                    writer.finish(&session, self.object_id, self.expected_size, true)?;
                Ok(())
            }
            ChannelState::Reading { cursor, .. } => {
                if let Some(size) = cursor.size() {
                    self.sealed_size = size;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn exists(&self) -> ChannelResult<bool> {
        let id = self.object_id;
        let routing = self.routing.clone();
        self.with_session(|session| Ok(session.exists(id, routing.as_ref())?))
    }

    /// Deletion of remotely-owned objects is not supported; the object
    /// stays readable.
    fn delete(&mut self) -> ChannelResult<()> {
        tracing::debug!(object = %self.object_id, "delete is a no-op on flight channels");
        Ok(())
    }

    fn size(&self) -> u64 {
        match &self.state {
            ChannelState::Writing { writer, .. } => writer.size(),
            ChannelState::Reading { cursor, .. } => cursor.size().unwrap_or(0),
            _ => self.sealed_size,
        }
    }

    fn buffer(&self) -> ChannelResult<Bytes> {
        let id = self.object_id;
        let routing = self.routing.clone();
        self.with_session(|session| Ok(session.get_buffer(id, routing.as_ref())?))
    }

    fn object_id(&self) -> ObjectId {
        self.object_id
    }

    fn data_url(&self) -> String {
        format!("plasmaflight://{}", self.object_id.to_hex())
    }
}
