//! Bounded response accumulator
//!
//! Collects response bytes into a fixed-capacity buffer that never grows.
//! Overflow is handled by silently dropping data rather than failing the
//! transfer: downstream code relies on a truncated buffer still being
//! usable text, so truncation is not an error here.

use crate::error::SearchError;

/// Fixed-capacity append-only byte buffer.
///
/// One byte of the stated capacity is always held in reserve, so the
/// content length never exceeds `capacity - 1` and the accumulated bytes
/// can be handed around as an ordinary text slice at any point.
///
/// The buffer is owned by a single in-flight search: allocated when the
/// exchange starts, dropped on every path out of it, never reused across
/// calls.
#[derive(Debug)]
pub struct ResponseBuffer {
    data: Vec<u8>,
    cap: usize,
}

impl ResponseBuffer {
    /// Allocate a buffer of `capacity` bytes up front.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::OutOfMemory`] if the allocation fails. The
    /// buffer is large relative to typical per-call budgets, so allocation
    /// failure is a real condition, not a theoretical one.
    pub fn with_capacity(capacity: usize) -> Result<Self, SearchError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| SearchError::OutOfMemory)?;
        Ok(Self {
            data,
            cap: capacity,
        })
    }

    /// Append a chunk, dropping it wholesale if it would not fit.
    ///
    /// If `len + chunk.len()` would meet or exceed the capacity the entire
    /// chunk is discarded and `false` is returned. No partial copy is ever
    /// made on this path, and the producer is not failed; partial results
    /// already accumulated stay valid.
    pub fn append(&mut self, chunk: &[u8]) -> bool {
        if self.data.len() + chunk.len() >= self.cap {
            return false;
        }
        self.data.extend_from_slice(chunk);
        true
    }

    /// Append as much of a chunk as fits below `capacity - 1`.
    ///
    /// The raw-stream read loop does its own bookkeeping and keeps every
    /// byte it can rather than dropping whole chunks. Returns the number of
    /// bytes actually copied, which may be zero once the buffer is full.
    pub fn append_clamped(&mut self, chunk: &[u8]) -> usize {
        let room = self.cap.saturating_sub(1).saturating_sub(self.data.len());
        let copy = chunk.len().min(room);
        self.data.extend_from_slice(&chunk[..copy]);
        copy
    }

    /// Number of content bytes accumulated so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no bytes have been accumulated
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stated capacity, including the reserved terminator byte
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether another byte can still be accepted
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.cap.saturating_sub(1)
    }

    /// Accumulated bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Accumulated content as text, with invalid UTF-8 replaced
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Discard everything before `offset`, compacting in place.
    ///
    /// Used by the framer to shrink the buffer down to the message body.
    /// An `offset` past the end clears the buffer.
    pub fn discard_front(&mut self, offset: usize) {
        let offset = offset.min(self.data.len());
        self.data.drain(..offset);
    }
}
