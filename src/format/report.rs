//! Fixed-capacity report destination

/// A caller-supplied text buffer with a hard capacity.
///
/// Writes never exceed `capacity - 1` content bytes (one byte is reserved
/// so the report can always be handed off as terminated text) and always
/// land on a UTF-8 boundary. Overflowing writes are truncated, never
/// errors.
#[derive(Debug)]
pub struct ReportBuffer {
    buf: String,
    cap: usize,
}

impl ReportBuffer {
    /// Create an empty report destination of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: String::new(),
            cap: capacity,
        }
    }

    /// Append text, truncating on a character boundary if it does not fit.
    /// Returns the number of bytes actually written.
    pub fn push_str(&mut self, s: &str) -> usize {
        let room = (self.cap.saturating_sub(1)).saturating_sub(self.buf.len());
        if s.len() <= room {
            self.buf.push_str(s);
            return s.len();
        }
        let mut end = room;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf.push_str(&s[..end]);
        end
    }

    /// Content bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Stated capacity, including the reserved byte
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether no further content byte can be written
    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.cap.saturating_sub(1)
    }

    /// Discard all content, keeping the capacity
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The report text
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl std::fmt::Display for ReportBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}
