//! Direct transport: one encrypted exchange via an HTTP-over-TLS client
//!
//! Certificate validation and the TLS handshake belong to the underlying
//! client; this strategy only shapes the request and streams the response
//! into the bounded accumulator.

use super::Transport;
use crate::buffer::ResponseBuffer;
use crate::config::Settings;
use crate::error::SearchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Exchange strategy backed by [`reqwest`]
pub struct DirectTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl DirectTransport {
    /// Build the strategy from settings.
    ///
    /// # Errors
    ///
    /// [`SearchError::Transport`] if the base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(settings: &Settings) -> Result<Self, SearchError> {
        let base_url = Url::parse(&settings.base_url())
            .map_err(|e| SearchError::Transport(format!("invalid base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| SearchError::Transport(format!("client construction failed: {e}")))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn fetch(
        &self,
        path: &str,
        credential: &str,
        buf: &mut ResponseBuffer,
    ) -> Result<u16, SearchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| SearchError::Transport(format!("invalid request path: {e}")))?;

        let mut response = self
            .client
            .get(url)
            .header("Accept", "text/markdown")
            .header("Authorization", format!("Bearer {credential}"))
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("request failed: {e}")))?;

        let status = response.status().as_u16();

        // stream the body chunk by chunk; a chunk the accumulator refuses
        // is dropped and the transfer continues
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SearchError::Transport(format!("body read failed: {e}")))?
        {
            if !buf.append(&chunk) {
                debug!("response chunk of {} bytes dropped, buffer full", chunk.len());
            }
        }

        debug!("direct exchange done, status {status}, {} bytes", buf.len());
        Ok(status)
    }
}
