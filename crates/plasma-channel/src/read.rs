use bytes::Bytes;

use crate::error::ChannelResult;

/// Lazy, forward-only cursor over a sealed object's buffer.
///
/// The first read materializes the full buffer through the supplied fetch;
/// subsequent reads advance through the same view without copying. The
/// cursor is not restartable: once exhausted it returns empty slices, and
/// re-reading from the start takes a fresh channel instance.
#[derive(Debug, Default)]
pub(crate) struct ReadCursor {
    buffer: Option<Bytes>,
    pos: usize,
}

impl ReadCursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Read up to `count` bytes, fetching the backing buffer on first use.
    /// An empty result means end of data.
    pub(crate) fn read(
        &mut self,
        count: usize,
        fetch: impl FnOnce() -> ChannelResult<Bytes>,
    ) -> ChannelResult<Bytes> {
        let buffer = match &mut self.buffer {
            Some(buffer) => buffer,
            slot => slot.insert(fetch()?),
        };
        let end = usize::min(self.pos + count, buffer.len());
        let chunk = buffer.slice(self.pos..end);
        self.pos = end;
        Ok(chunk)
    }

    /// The full buffer size, known once materialized.
    pub(crate) fn size(&self) -> Option<u64> {
        self.buffer.as_ref().map(|b| b.len() as u64)
    }
}
