//! mdsearch: a bounded-memory web search client
//!
//! Given a free-text query, the client reaches a remote search API over
//! one of two transport paths (a direct encrypted connection, or raw HTTP
//! driven over a tunneled byte stream), collects a capped amount of
//! response data, extracts a handful of markdown result links, and hands
//! back a fixed-size report. Memory use is bounded end to end: the
//! response accumulator and the report destination both have hard
//! capacities and degrade by truncation, never by growth or failure.

pub mod buffer;
pub mod config;
pub mod credential;
pub mod error;
pub mod format;
pub mod framing;
pub mod query;
pub mod search;
pub mod transport;

pub use buffer::ResponseBuffer;
pub use config::Settings;
pub use credential::CredentialStore;
pub use error::SearchError;
pub use format::ReportBuffer;
pub use search::SearchClient;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
