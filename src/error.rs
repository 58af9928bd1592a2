//! Error taxonomy for the search client
//!
//! Every failure a caller can observe maps onto one of these variants.
//! The orchestrator converts each variant into a human-readable sentence
//! written into the caller's report buffer; the variant itself is the
//! machine-readable side of that contract.

use thiserror::Error;

/// Errors surfaced by a search call
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API credential is configured; terminal until the user sets one
    #[error("no search API key configured")]
    NoCredential,

    /// The inbound request document is malformed or the query is missing/empty
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Connection, write, read, or non-200 remote status. Reported
    /// generically; the underlying cause goes to the log only.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response buffer could not be allocated
    #[error("out of memory allocating response buffer")]
    OutOfMemory,
}
