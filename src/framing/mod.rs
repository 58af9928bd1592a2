//! Raw HTTP framing recovery
//!
//! The proxied transport reads an undifferentiated byte stream: status
//! line, headers, and body concatenated. This module recovers the numeric
//! status code and compacts the accumulator down to just the body. It
//! never fails; a response that cannot be parsed yields status 0, which no
//! caller accepts as success.

use crate::buffer::ResponseBuffer;

/// Leading protocol marker of a raw HTTP response
const HTTP_MARKER: &[u8] = b"HTTP/";

/// Empty-line separator between headers and body
const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Parse the status code from a raw response.
///
/// Recognizes a leading literal `HTTP/` marker and reads the integer
/// following the first space. Any shape that does not parse (no marker, no
/// space, no digits) yields 0.
pub fn parse_status(raw: &[u8]) -> u16 {
    if raw.len() <= HTTP_MARKER.len() || !raw.starts_with(HTTP_MARKER) {
        return 0;
    }
    let Some(space) = raw.iter().position(|&b| b == b' ') else {
        return 0;
    };

    let digits: &[u8] = &raw[space + 1..];
    let end = digits
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    // at most 3 digits in any real status line; longer runs overflow to 0
    std::str::from_utf8(&digits[..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Compact the accumulator in place so it holds only the message body.
///
/// Locates the first CRLFCRLF separator and discards everything up to and
/// including it. If no separator is present the buffer is left untouched
/// and the caller must treat the whole accumulation as body. Returns
/// whether a separator was found.
pub fn strip_headers(buf: &mut ResponseBuffer) -> bool {
    let Some(pos) = find_separator(buf.as_bytes()) else {
        return false;
    };
    buf.discard_front(pos + HEADER_SEPARATOR.len());
    true
}

/// Recover the status code and strip framing in one pass.
///
/// This is what the proxied transport calls after its read loop ends: the
/// status is parsed from the (still framed) buffer, then the headers are
/// discarded.
pub fn finalize(buf: &mut ResponseBuffer) -> u16 {
    let status = parse_status(buf.as_bytes());
    strip_headers(buf);
    status
}

fn find_separator(raw: &[u8]) -> Option<usize> {
    raw.windows(HEADER_SEPARATOR.len())
        .position(|w| w == HEADER_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_with(content: &[u8]) -> ResponseBuffer {
        let mut buf = ResponseBuffer::with_capacity(1024).unwrap();
        assert!(buf.append(content));
        buf
    }

    #[test]
    fn test_status_and_body_recovered() {
        let mut buf = buf_with(b"HTTP/1.1 200 OK\r\nX: y\r\n\r\nBODY");
        assert_eq!(finalize(&mut buf), 200);
        assert_eq!(buf.as_bytes(), b"BODY");
    }

    #[test]
    fn test_missing_separator_leaves_buffer_untouched() {
        let mut buf = buf_with(b"HTTP/1.1 404 Not Found\r\nX: y");
        // status parsing still succeeds independently
        assert_eq!(parse_status(buf.as_bytes()), 404);
        assert!(!strip_headers(&mut buf));
        assert_eq!(buf.as_bytes(), b"HTTP/1.1 404 Not Found\r\nX: y");
    }

    #[test]
    fn test_no_marker_yields_zero() {
        assert_eq!(parse_status(b"FTP/1.0 200"), 0);
        assert_eq!(parse_status(b""), 0);
        assert_eq!(parse_status(b"HTTP/"), 0);
    }

    #[test]
    fn test_garbled_status_yields_zero() {
        assert_eq!(parse_status(b"HTTP/1.1 abc"), 0);
        assert_eq!(parse_status(b"HTTP/1.1"), 0);
    }

    #[test]
    fn test_empty_body_after_separator() {
        let mut buf = buf_with(b"HTTP/1.1 204 No Content\r\n\r\n");
        assert_eq!(finalize(&mut buf), 204);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_body_containing_separator_kept_intact() {
        let mut buf = buf_with(b"HTTP/1.1 200 OK\r\n\r\nfirst\r\n\r\nsecond");
        assert_eq!(finalize(&mut buf), 200);
        assert_eq!(buf.as_bytes(), b"first\r\n\r\nsecond");
    }
}
