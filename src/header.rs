//! Owned header byte buffer with a grow-only reallocation policy.

use crate::error::{Error, Result};

/// Initial header buffer capacity. Parameter-set extradata for most streams
/// fits well under this, so a single allocation serves the whole session.
pub(crate) const HDR_BUF_CAPACITY: usize = 1024;

/// An owned byte buffer holding codec header bytes ahead of a payload.
///
/// Capacity only ever grows: filling with a source larger than the current
/// capacity reallocates to exactly the source length, while smaller sources
/// reuse the existing allocation in place. This amortizes allocation across
/// packets whose header sizes vary.
#[derive(Debug)]
pub struct HeaderBuffer {
    buf: Vec<u8>,
}

impl HeaderBuffer {
    /// Allocate an empty buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory {
                requested: capacity,
            })?;
        Ok(Self { buf })
    }

    /// Copy `src` into the buffer, replacing any previous contents.
    ///
    /// Reallocates only when `src` exceeds the current capacity. The
    /// payload side of the packet is unaffected by an allocation failure.
    pub fn fill(&mut self, src: &[u8]) -> Result<()> {
        if src.len() > self.buf.capacity() {
            self.buf = Vec::new();
            self.buf
                .try_reserve_exact(src.len())
                .map_err(|_| Error::OutOfMemory {
                    requested: src.len(),
                })?;
        }
        self.buf.clear();
        self.buf.extend_from_slice(src);
        Ok(())
    }

    /// Header bytes currently stored.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Stored header length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no header bytes are stored.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current allocation capacity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}
