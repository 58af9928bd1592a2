//! Proxied transport: raw HTTP over a tunneled byte stream
//!
//! The tunnel provider hands back an already-connected channel to the
//! target host; whatever transport security the deployment requires has
//! been negotiated before this strategy sees the stream. The strategy
//! writes a hand-built request, drains the stream into the accumulator
//! under a per-read timeout, then recovers status and body with the
//! framer.

use super::Transport;
use crate::buffer::ResponseBuffer;
use crate::config::Settings;
use crate::error::SearchError;
use crate::framing;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// An open, readable/writable byte stream to the target host
pub trait TunnelChannel: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> TunnelChannel for T {}

/// Capability to open a byte-stream channel to a named host and port
#[async_trait]
pub trait TunnelProvider: Send + Sync {
    /// Open a connected channel, observing `connect_timeout`.
    ///
    /// # Errors
    ///
    /// [`SearchError::Transport`] if the channel cannot be established in
    /// time.
    async fn open(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
    ) -> Result<Box<dyn TunnelChannel>, SearchError>;
}

/// Plain TCP tunnel provider
pub struct TcpTunnel;

#[async_trait]
impl TunnelProvider for TcpTunnel {
    async fn open(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
    ) -> Result<Box<dyn TunnelChannel>, SearchError> {
        let stream = timeout(connect_timeout, TcpStream::connect((host, port)))
            .await
            .map_err(|_| SearchError::Transport(format!("connect to {host}:{port} timed out")))?
            .map_err(|e| SearchError::Transport(format!("connect to {host}:{port} failed: {e}")))?;
        Ok(Box::new(stream))
    }
}

/// Exchange strategy that drives raw HTTP over a tunnel channel
pub struct ProxiedTransport {
    provider: Box<dyn TunnelProvider>,
    host: String,
    port: u16,
    io_timeout: Duration,
    chunk_size: usize,
}

impl ProxiedTransport {
    /// Build the strategy with the default TCP tunnel provider
    pub fn new(settings: &Settings) -> Self {
        Self::with_provider(Box::new(TcpTunnel), settings)
    }

    /// Build the strategy with a custom tunnel provider
    pub fn with_provider(provider: Box<dyn TunnelProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            host: settings.search_host.clone(),
            port: settings.search_port,
            io_timeout: Duration::from_secs(settings.timeout_seconds),
            chunk_size: settings.chunk_size,
        }
    }

    fn build_request(&self, path: &str, credential: &str) -> String {
        format!(
            "GET {path} HTTP/1.1\r\n\
             Host: {host}\r\n\
             Accept: text/markdown\r\n\
             Authorization: Bearer {credential}\r\n\
             Connection: close\r\n\r\n",
            host = self.host,
        )
    }
}

#[async_trait]
impl Transport for ProxiedTransport {
    fn name(&self) -> &'static str {
        "proxied"
    }

    async fn fetch(
        &self,
        path: &str,
        credential: &str,
        buf: &mut ResponseBuffer,
    ) -> Result<u16, SearchError> {
        let mut channel = self
            .provider
            .open(&self.host, self.port, self.io_timeout)
            .await?;

        let request = self.build_request(path, credential);
        if let Err(e) = channel.write_all(request.as_bytes()).await {
            let _ = channel.shutdown().await;
            return Err(SearchError::Transport(format!("request write failed: {e}")));
        }

        // drain the stream until it closes, times out, or the accumulator
        // fills; every byte that fits below the capacity reserve is kept
        let mut chunk = vec![0u8; self.chunk_size];
        while !buf.is_full() {
            match timeout(self.io_timeout, channel.read(&mut chunk)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    buf.append_clamped(&chunk[..n]);
                }
                Ok(Err(e)) => {
                    debug!("tunnel read ended: {e}");
                    break;
                }
                Err(_) => {
                    debug!("tunnel read timed out");
                    break;
                }
            }
        }

        let _ = channel.shutdown().await;

        let status = framing::finalize(buf);
        debug!("proxied exchange done, status {status}, {} bytes", buf.len());
        Ok(status)
    }
}
