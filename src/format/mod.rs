//! Result formatting
//!
//! Scans a markdown body for `[title](url)` constructs and renders a
//! numbered, bounded report into a fixed-capacity destination. When the
//! body yields no links the caller still gets something: a leading excerpt
//! of the raw text.

mod report;

pub use report::ReportBuffer;

/// Maximum number of link entries rendered into a report
pub const MAX_LINKS: usize = 5;

/// Title text is truncated to this many bytes
const MAX_TITLE_BYTES: usize = 100;

/// URL text is truncated to this many bytes
const MAX_URL_BYTES: usize = 200;

/// A candidate whose URL span exceeds this is rejected outright
const MAX_URL_SPAN: usize = 512;

/// Bytes held back from the raw-text fallback excerpt
const FALLBACK_RESERVE: usize = 50;

const NO_RESULTS: &str = "No web results found.";
const HEADER: &str = "Search results:\n\n";

/// Render a markdown body into `out` as a numbered link report.
///
/// An empty body produces a fixed "no results" sentence. Otherwise a
/// header line is written and the body is scanned left to right: the first
/// `[` opens a title, the literal `](` closes it and opens a URL, and the
/// next `)` closes the URL. Titles are truncated to 100 bytes and URLs to
/// 200; a candidate whose URL span exceeds 512 bytes is rejected and the
/// scan advances one byte. Scanning stops after [`MAX_LINKS`] entries,
/// when the destination fills, or at end of input. If the full scan emits
/// nothing, a leading slice of the raw body is copied instead so the
/// caller still sees something.
///
/// The function is pure: the same body and a same-capacity destination
/// always produce identical output.
pub fn format_results(markdown: &str, out: &mut ReportBuffer) {
    if markdown.is_empty() {
        out.push_str(NO_RESULTS);
        return;
    }

    out.push_str(HEADER);

    let bytes = markdown.as_bytes();
    let mut pos = 0;
    let mut emitted = 0;

    while pos < bytes.len() && !out.is_full() && emitted < MAX_LINKS {
        if bytes[pos] != b'[' {
            pos += 1;
            continue;
        }

        let title_start = pos + 1;
        let Some(title_end) = find_from(bytes, title_start, b"](") else {
            // no title terminator anywhere ahead: no later candidate can
            // complete either
            break;
        };

        let url_start = title_end + 2;
        let Some(url_end) = find_from(bytes, url_start, b")") else {
            break;
        };

        if url_end - url_start >= MAX_URL_SPAN {
            pos += 1;
            continue;
        }

        let title = truncate_str(&markdown[title_start..title_end], MAX_TITLE_BYTES);
        let url = truncate_str(&markdown[url_start..url_end], MAX_URL_BYTES);

        emitted += 1;
        out.push_str(&format!("{emitted}. {title}\n   {url}\n\n"));

        pos = url_end + 1;
    }

    if emitted == 0 {
        let excerpt_len = markdown
            .len()
            .min(out.capacity().saturating_sub(FALLBACK_RESERVE));
        out.push_str(truncate_str(markdown, excerpt_len));
    }
}

/// First occurrence of `needle` at or after `start`, as an absolute offset
fn find_from(haystack: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    if start > haystack.len() {
        return None;
    }
    haystack[start..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + start)
}

/// Truncate to at most `max` bytes, landing on a UTF-8 boundary
fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
