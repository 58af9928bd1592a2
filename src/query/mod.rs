//! Query intake and encoding
//!
//! Parses the inbound request document and percent-encodes the free-text
//! query into the URL-safe form the search API expects.

use crate::error::SearchError;
use serde::Deserialize;

/// Maximum length of the encoded query parameter, including the reserved
/// terminator byte
pub const MAX_ENCODED_QUERY: usize = 256;

/// A validated search request: one non-empty free-text query.
///
/// Created per call from the caller-supplied JSON document and dropped when
/// the orchestration call returns.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query, guaranteed non-empty
    pub query: String,
}

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    query: Option<String>,
}

/// Parse the inbound request document.
///
/// The document is JSON with one required field, `query`.
///
/// # Errors
///
/// [`SearchError::InvalidInput`] if the document is not valid JSON or the
/// `query` field is missing or empty. The error message is the exact
/// sentence fragment the orchestrator reports.
pub fn parse_request(input: &str) -> Result<SearchRequest, SearchError> {
    let raw: RawRequest = serde_json::from_str(input)
        .map_err(|_| SearchError::InvalidInput("Invalid input JSON".to_string()))?;

    match raw.query {
        Some(query) if !query.is_empty() => Ok(SearchRequest { query }),
        _ => Err(SearchError::InvalidInput(
            "Missing 'query' field".to_string(),
        )),
    }
}

/// Percent-encode a query string for use as a URL parameter.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through, a space
/// becomes `+`, and every other byte becomes `%XX` with uppercase hex.
/// Encoding stops once fewer than three bytes of headroom remain below
/// `max_out` (the worst case for one source byte, with one byte reserved
/// for a terminator), silently truncating the remainder. This is a bounded
/// best-effort transform with no error conditions.
pub fn encode_query(raw: &str, max_out: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::new();
    for &b in raw.as_bytes() {
        if out.len() + 3 >= max_out {
            break;
        }
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0F) as usize] as char);
            }
        }
    }
    out
}
