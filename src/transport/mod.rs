//! Transport strategies for the search exchange
//!
//! One request/response exchange can travel two ways: the direct path
//! hands the whole exchange to an encrypted HTTP client, the proxied path
//! drives raw HTTP bytes over a channel obtained from a tunnel provider.
//! Both stream received bytes into the caller's [`ResponseBuffer`] and
//! report the remote status code; the orchestrator picks one variant per
//! call and stays agnostic of which.

mod direct;
mod proxied;

pub use direct::DirectTransport;
pub use proxied::{ProxiedTransport, TcpTunnel, TunnelChannel, TunnelProvider};

use crate::buffer::ResponseBuffer;
use crate::error::SearchError;
use async_trait::async_trait;

/// A strategy for one complete request/response exchange.
///
/// `fetch` performs a single GET of `path` against the configured remote,
/// authenticating with the bearer `credential`, and accumulates the
/// response body into `buf`. The returned value is the remote status code;
/// a non-200 status is not a transport error here, the caller decides what
/// to make of it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Perform the exchange.
    ///
    /// # Errors
    ///
    /// [`SearchError::Transport`] on connection establishment, write, or
    /// request-level failure. Read-side truncation is not an error; the
    /// accumulated partial body stays usable.
    async fn fetch(
        &self,
        path: &str,
        credential: &str,
        buf: &mut ResponseBuffer,
    ) -> Result<u16, SearchError>;
}
