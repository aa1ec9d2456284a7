use bytes::Bytes;
use plasma_client::{StoreClient, StoreConnector};
use plasma_types::{ExpectedSize, ObjectId, StoreLocation};

use crate::channel::{ChannelState, ObjectChannel, OpenMode};
use crate::error::{ChannelError, ChannelResult};
use crate::read::ReadCursor;
use crate::write::{WriteMode, WriteState};

/// Channel over a directly-connected plasma store.
///
/// Binds the write-mode state machine and read cursor to a [`StoreClient`]
/// session created from the connector at open time. Existence is answered
/// from the store's live-object listing and `delete` removes the object
/// outright.
pub struct PlasmaChannel<C: StoreConnector> {
    connector: C,
    location: StoreLocation,
    object_id: ObjectId,
    expected_size: ExpectedSize,
    mode: WriteMode,
    state: ChannelState<C::Session>,
    sealed_size: u64,
}

impl<C: StoreConnector> PlasmaChannel<C> {
    /// Create an unopened channel bound to `object_id`, in direct mode with
    /// no declared size.
    pub fn new(connector: C, location: StoreLocation, object_id: ObjectId) -> Self {
        Self {
            connector,
            location,
            object_id,
            expected_size: ExpectedSize::unknown(),
            mode: WriteMode::default(),
            state: ChannelState::Unopened,
            sealed_size: 0,
        }
    }

    /// Declare the total size to be written, letting direct mode allocate
    /// up front and accept multiple writes.
    pub fn with_expected_size(mut self, expected_size: ExpectedSize) -> Self {
        self.expected_size = expected_size;
        self
    }

    /// Select the write mode. Resolved once; fixed for the channel's life.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run `op` against the open session, or an ephemeral one when the
    /// channel is not open (queries remain answerable after close).
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

    fn fetch(session: &C::Session, id: ObjectId) -> ChannelResult<Bytes> {
        let mut buffers = session.get_buffers(&[id])?;
        buffers.pop().ok_or(ChannelError::NotFound(id))
    }
}

impl<C: StoreConnector> ObjectChannel for PlasmaChannel<C> {
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
                writer.write(session, self.object_id, self.expected_size, data)
            }
            _ => Err(ChannelError::NotWritable),
        }
    }

    fn read(&mut self, count: usize) -> ChannelResult<Bytes> {
        let object_id = self.object_id;
        match &mut self.state {
            ChannelState::Reading { session, cursor } => {
                cursor.read(count, || Self::fetch(session, object_id))
            }
            _ => Err(ChannelError::NotReadable),
        }
    }

    fn close(&mut self) -> ChannelResult<()> {
        // A failure below leaves the state Closed and the object unsealed;
        // callers must retry under a fresh identifier.
        match std::mem::replace(&mut self.state, ChannelState::Closed) {
            ChannelState::Writing { session, writer } => {
                self.sealed_size =
                    writer.finish(&session, self.object_id, self.expected_size, false)?;
                Ok(())
            }
            ChannelState::Reading { cursor, .. } => {
                if let Some(size) = cursor.size() {
                    self.sealed_size = size;
                }
                Ok(())
            }
            // Unopened or already closed: nothing to finalize.
            _ => Ok(()),
        }
    }

    fn exists(&self) -> ChannelResult<bool> {
        let id = self.object_id;
        self.with_session(|session| Ok(session.list()?.contains(&id)))
    }

    fn delete(&mut self) -> ChannelResult<()> {
        let id = self.object_id;
        self.with_session(|session| Ok(session.delete(&[id])?))
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
        self.with_session(|session| Self::fetch(session, id))
    }

    fn object_id(&self) -> ObjectId {
        self.object_id
    }

    fn data_url(&self) -> String {
        format!("plasma://{}", self.object_id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_client::InMemoryPlasmaStore;
    use proptest::prelude::*;

    fn channel(store: &InMemoryPlasmaStore, byte: u8) -> PlasmaChannel<InMemoryPlasmaStore> {
        PlasmaChannel::new(
            store.clone(),
            StoreLocation::default(),
            ObjectId::new([byte; 20]),
        )
    }

    // -----------------------------------------------------------------------
    // Direct-mode round trips
    // -----------------------------------------------------------------------

    #[test]
    fn direct_multi_write_roundtrip() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 1).with_expected_size(ExpectedSize::bytes(10));
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"01234").unwrap();
        writer.write(b"56789").unwrap();
        writer.close().unwrap();
        assert_eq!(writer.size(), 10);

        let mut reader = channel(&store, 1);
        reader.open(OpenMode::Read).unwrap();
        let data = reader.read(64).unwrap();
        assert_eq!(&data[..], b"0123456789");
        assert!(reader.read(64).unwrap().is_empty());
    }

    #[test]
    fn direct_single_write_without_expected_size() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 2);
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"one shot").unwrap();
        writer.close().unwrap();
        assert_eq!(writer.size(), 8);

        let mut reader = channel(&store, 2);
        reader.open(OpenMode::Read).unwrap();
        assert_eq!(&reader.read(100).unwrap()[..], b"one shot");
    }

    #[test]
    fn direct_overflow_leaves_object_unsealed() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 3).with_expected_size(ExpectedSize::bytes(4));
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"abc").unwrap();

        let err = writer.write(b"de").unwrap_err();
        assert!(matches!(
            err,
            ChannelError::Overflow {
                attempted: 5,
                allocated: 4
            }
        ));

        // Not sealed, so invisible to readers.
        assert!(!writer.exists().unwrap());
        let mut reader = channel(&store, 3);
        reader.open(OpenMode::Read).unwrap();
        assert!(matches!(reader.read(4), Err(ChannelError::NotFound(_))));
    }

    // -----------------------------------------------------------------------
    // Staged-mode round trips
    // -----------------------------------------------------------------------

    #[test]
    fn staged_multi_write_roundtrip() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 4).with_write_mode(WriteMode::Staged);
        writer.open(OpenMode::Write).unwrap();
        for chunk in [&b"alpha "[..], b"beta ", b"gamma"] {
            writer.write(chunk).unwrap();
        }
        writer.close().unwrap();
        assert_eq!(writer.size(), 16);

        let mut reader = channel(&store, 4);
        reader.open(OpenMode::Read).unwrap();
        assert_eq!(&reader.read(1024).unwrap()[..], b"alpha beta gamma");
    }

    #[test]
    fn staged_zero_length_write_contributes_nothing() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 5).with_write_mode(WriteMode::Staged);
        writer.open(OpenMode::Write).unwrap();
        writer.write(&vec![0xaa; 100]).unwrap();
        writer.write(b"").unwrap();
        writer.write(&vec![0xbb; 250]).unwrap();
        writer.close().unwrap();
        assert_eq!(writer.size(), 350);

        let mut reader = channel(&store, 5);
        reader.open(OpenMode::Read).unwrap();
        let data = reader.buffer().unwrap();
        assert_eq!(data.len(), 350);
        assert!(data[..100].iter().all(|&b| b == 0xaa));
        assert!(data[100..].iter().all(|&b| b == 0xbb));
    }

    // -----------------------------------------------------------------------
    // Existence, size, delete
    // -----------------------------------------------------------------------

    #[test]
    fn exists_flips_at_close() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 6);
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"data").unwrap();
        assert!(!writer.exists().unwrap());

        writer.close().unwrap();
        // The channel is closed; the query uses an ephemeral session.
        assert!(writer.exists().unwrap());
    }

    #[test]
    fn delete_makes_reads_fail() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 7);
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"doomed").unwrap();
        writer.close().unwrap();

        writer.delete().unwrap();
        assert!(!writer.exists().unwrap());

        let mut reader = channel(&store, 7);
        reader.open(OpenMode::Read).unwrap();
        assert!(matches!(reader.read(6), Err(ChannelError::NotFound(_))));
    }

    #[test]
    fn close_without_writes_publishes_empty_object() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 8);
        writer.open(OpenMode::Write).unwrap();
        writer.close().unwrap();
        assert!(writer.exists().unwrap());
        assert_eq!(writer.size(), 0);
        assert!(writer.buffer().unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Lifecycle discipline
    // -----------------------------------------------------------------------

    #[test]
    fn close_is_idempotent() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 9);
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"once").unwrap();
        writer.close().unwrap();
        // A second close must not attempt to re-seal.
        writer.close().unwrap();
        assert_eq!(writer.size(), 4);
    }

    #[test]
    fn open_twice_is_rejected() {
        let store = InMemoryPlasmaStore::new();
        let mut ch = channel(&store, 10);
        ch.open(OpenMode::Write).unwrap();
        assert!(matches!(ch.open(OpenMode::Read), Err(ChannelError::AlreadyOpen)));
    }

    #[test]
    fn phase_misuse_is_rejected() {
        let store = InMemoryPlasmaStore::new();

        let mut unopened = channel(&store, 11);
        assert!(matches!(unopened.write(b"x"), Err(ChannelError::NotWritable)));
        assert!(matches!(unopened.read(1), Err(ChannelError::NotReadable)));

        let mut writer = channel(&store, 11);
        writer.open(OpenMode::Write).unwrap();
        assert!(matches!(writer.read(1), Err(ChannelError::NotReadable)));
        writer.write(b"x").unwrap();
        writer.close().unwrap();
        assert!(matches!(writer.write(b"y"), Err(ChannelError::NotWritable)));

        let mut reader = channel(&store, 11);
        reader.open(OpenMode::Read).unwrap();
        assert!(matches!(reader.write(b"z"), Err(ChannelError::NotWritable)));
    }

    #[test]
    fn buffer_is_independent_of_cursor() {
        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 12);
        writer.open(OpenMode::Write).unwrap();
        writer.write(b"independent").unwrap();
        writer.close().unwrap();

        let mut reader = channel(&store, 12);
        reader.open(OpenMode::Read).unwrap();
        assert_eq!(&reader.read(5).unwrap()[..], b"indep");
        // Full view regardless of cursor position.
        assert_eq!(&reader.buffer().unwrap()[..], b"independent");
        assert_eq!(&reader.read(100).unwrap()[..], b"endent");
    }

    #[test]
    fn data_url_is_scheme_qualified_hex() {
        let store = InMemoryPlasmaStore::new();
        let ch = channel(&store, 0xab);
        assert_eq!(
            ch.data_url(),
            format!("plasma://{}", "ab".repeat(20))
        );
        assert_eq!(ch.object_id(), ObjectId::new([0xab; 20]));
    }

    // -----------------------------------------------------------------------
    // End-to-end scenario: 4 MiB in 512 KiB writes, 1 MiB reads
    // -----------------------------------------------------------------------

    #[test]
    fn four_mib_blockwise_roundtrip() {
        const TOTAL: u64 = 4 * 1024 * 1024;
        const BLOCK: usize = 512 * 1024;

        let store = InMemoryPlasmaStore::new();
        let mut writer = channel(&store, 13).with_expected_size(ExpectedSize::bytes(TOTAL));
        writer.open(OpenMode::Write).unwrap();

        let mut written = Vec::with_capacity(TOTAL as usize);
        for i in 0..8u8 {
            let block = vec![i; BLOCK];
            assert_eq!(writer.write(&block).unwrap(), BLOCK);
            written.extend_from_slice(&block);
        }
        writer.close().unwrap();
        assert_eq!(writer.size(), TOTAL);

        let mut reader = channel(&store, 13);
        reader.open(OpenMode::Read).unwrap();
        let mut read_back = Vec::with_capacity(TOTAL as usize);
        loop {
            let chunk = reader.read(1024 * 1024).unwrap();
            if chunk.is_empty() {
                break;
            }
            read_back.extend_from_slice(&chunk);
        }
        assert_eq!(read_back, written);
        assert_eq!(reader.size(), TOTAL);
    }

    // -----------------------------------------------------------------------
    // Properties: arbitrary write sequences round-trip byte-for-byte
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn direct_writes_with_declared_total_roundtrip(
            chunks in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..64),
                1..8,
            )
        ) {
            let total: usize = chunks.iter().map(Vec::len).sum();
            let store = InMemoryPlasmaStore::new();
            let mut writer = channel(&store, 14)
                .with_expected_size(ExpectedSize::from(Some(total as u64)));
            writer.open(OpenMode::Write).unwrap();
            for chunk in &chunks {
                writer.write(chunk).unwrap();
            }
            writer.close().unwrap();

            let mut reader = channel(&store, 14);
            reader.open(OpenMode::Read).unwrap();
            let expected: Vec<u8> = chunks.concat();
            prop_assert_eq!(&reader.buffer().unwrap()[..], &expected[..]);
            prop_assert_eq!(writer.size(), total as u64);
        }

        #[test]
        fn staged_writes_without_declared_size_roundtrip(
            chunks in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..64),
                0..8,
            )
        ) {
            let store = InMemoryPlasmaStore::new();
            let mut writer = channel(&store, 15).with_write_mode(WriteMode::Staged);
            writer.open(OpenMode::Write).unwrap();
            for chunk in &chunks {
                writer.write(chunk).unwrap();
            }
            writer.close().unwrap();

            let mut reader = channel(&store, 15);
            reader.open(OpenMode::Read).unwrap();
            let expected: Vec<u8> = chunks.concat();
            prop_assert_eq!(&reader.buffer().unwrap()[..], &expected[..]);
        }
    }
}
