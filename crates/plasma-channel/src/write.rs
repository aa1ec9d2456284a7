use plasma_client::ObjectWriter;
use plasma_types::{ExpectedSize, ObjectId};

use crate::error::{ChannelError, ChannelResult};

/// How a channel moves bytes into the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Single fixed-size allocation sized at the first write; every write
    /// must fit within it.
    #[default]
    Direct,
    /// Writes accumulate in a growable local buffer, copied into the store
    /// in one bulk transfer at close.
    Staged,
}

/// Write-side state machine shared by the local and flight adapters.
///
/// Resolved once at open time from the channel's [`WriteMode`]; the two
/// variants never convert into each other. `BufferSize` is set at most once:
/// at the first direct-mode write, or implicitly at close in staged mode.
#[derive(Debug)]
pub(crate) enum WriteState {
    Direct {
        /// Fixed allocation size, set by the first write.
        allocated: Option<u64>,
        /// Next write offset; monotonically advancing.
        cursor: u64,
    },
    Staged { staging: Vec<u8> },
}

impl WriteState {
    pub(crate) fn new(mode: WriteMode) -> Self {
        match mode {
            WriteMode::Direct => Self::Direct {
                allocated: None,
                cursor: 0,
            },
            WriteMode::Staged => Self::Staged {
                staging: Vec::new(),
            },
        }
    }

    /// Bytes accepted so far.
    pub(crate) fn bytes_written(&self) -> u64 {
        match self {
            Self::Direct { cursor, .. } => *cursor,
            Self::Staged { staging } => staging.len() as u64,
        }
    }

    /// The allocation size, once known: the fixed buffer size in direct
    /// mode, the staging length in staged mode.
    pub(crate) fn size(&self) -> u64 {
        match self {
            Self::Direct { allocated, .. } => allocated.unwrap_or(0),
            Self::Staged { staging } => staging.len() as u64,
        }
    }

    pub(crate) fn is_staged(&self) -> bool {
        matches!(self, Self::Staged { .. })
    }

    /// Accept one write.
    ///
    /// In direct mode the first call allocates `expected` bytes if declared,
    /// else the length of this write; the overflow check runs before any
    /// byte reaches the store.
    pub(crate) fn write<W>(
        &mut self,
        session: &W,
        id: ObjectId,
        expected: ExpectedSize,
        data: &[u8],
    ) -> ChannelResult<usize>
    where
        W: ObjectWriter + ?Sized,
    {
        match self {
            Self::Direct { allocated, cursor } => {
                let len = data.len() as u64;
                let buffer_size = match *allocated {
                    Some(size) => size,
                    None => {
                        let size = expected.get().unwrap_or(len);
                        session.create(id, size)?;
                        *allocated = Some(size);
                        size
                    }
                };
                if *cursor + len > buffer_size {
                    return Err(ChannelError::Overflow {
                        attempted: *cursor + len,
                        allocated: buffer_size,
                    });
                }
                session.write_at(id, *cursor, data)?;
                *cursor += len;
                Ok(data.len())
            }
            Self::Staged { staging } => {
                staging.extend_from_slice(data);
                Ok(data.len())
            }
        }
    }

    /// Finalize the object, returning its sealed size.
    ///
    /// Direct mode seals the fixed allocation (allocating an empty one if
    /// nothing was ever written, so the object still becomes visible).
    /// Staged mode performs the single bulk transfer, which seals
    /// atomically. With `warn_on_mismatch`, a direct-mode discrepancy
    /// between declared and written size is logged and sealing proceeds
    /// anyway.
    pub(crate) fn finish<W>(
        self,
        session: &W,
        id: ObjectId,
        expected: ExpectedSize,
        warn_on_mismatch: bool,
    ) -> ChannelResult<u64>
    where
        W: ObjectWriter + ?Sized,
    {
        match self {
            Self::Direct { allocated, cursor } => {
                let size = match allocated {
                    Some(size) => size,
                    None => {
                        let size = expected.get().unwrap_or(0);
                        session.create(id, size)?;
                        size
                    }
                };
                if warn_on_mismatch {
                    if let Some(declared) = expected.get() {
                        if declared != cursor {
                            tracing::warn!(
                                object = %id,
                                written = cursor,
                                expected = declared,
                                "sealing object with fewer bytes than declared"
                            );
                        }
                    }
                }
                session.seal(id)?;
                Ok(size)
            }
            Self::Staged { staging } => {
                session.put_raw_buffer(&staging, id)?;
                Ok(staging.len() as u64)
            }
        }
    }
}
