//! Search orchestration
//!
//! Drives one end-to-end search: credential check, request validation,
//! query encoding, transport selection, the exchange itself, and report
//! formatting. One attempt per call, no retries; the caller serializes
//! calls.

use crate::buffer::ResponseBuffer;
use crate::config::Settings;
use crate::credential::CredentialStore;
use crate::error::SearchError;
use crate::format::{self, ReportBuffer};
use crate::query::{self, MAX_ENCODED_QUERY};
use crate::transport::{DirectTransport, ProxiedTransport, Transport};
use tracing::{debug, error, info, warn};

/// One search client: settings plus the process-wide credential.
///
/// The credential follows a single-writer/multi-reader discipline with no
/// internal locking: callers must not run [`SearchClient::set_credential`]
/// concurrently with [`SearchClient::execute`].
pub struct SearchClient {
    settings: Settings,
    credential: CredentialStore,
}

impl SearchClient {
    /// Create a client from settings and a loaded credential store
    pub fn new(settings: Settings, credential: CredentialStore) -> Self {
        Self {
            settings,
            credential,
        }
    }

    /// Overwrite the API credential, in memory and persisted together
    ///
    /// # Errors
    ///
    /// Fails if the persisted copy cannot be written.
    pub fn set_credential(&mut self, key: &str) -> anyhow::Result<()> {
        self.credential.set(key)
    }

    /// Run one search described by the JSON document `input`, writing the
    /// report (or an error sentence) into `out`.
    ///
    /// `out` always receives human-readable text, on success and on
    /// failure alike; the returned [`SearchError`] is the machine-readable
    /// side. The response accumulator lives only for the duration of this
    /// call.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoCredential`] if no API key is configured,
    /// [`SearchError::InvalidInput`] for a malformed request document,
    /// [`SearchError::OutOfMemory`] if the accumulator cannot be
    /// allocated, and [`SearchError::Transport`] for any exchange failure
    /// including a non-200 remote status.
    pub async fn execute(&self, input: &str, out: &mut ReportBuffer) -> Result<(), SearchError> {
        out.clear();

        let Some(credential) = self.credential.get() else {
            out.push_str(
                "Error: No search API key configured. Set one with 'mdsearch set-key <KEY>'.",
            );
            return Err(SearchError::NoCredential);
        };

        let request = match query::parse_request(input) {
            Ok(request) => request,
            Err(e) => {
                if let SearchError::InvalidInput(ref msg) = e {
                    out.push_str(&format!("Error: {msg}"));
                }
                return Err(e);
            }
        };

        info!("searching: {}", request.query);

        let encoded = query::encode_query(&request.query, MAX_ENCODED_QUERY);
        let path = format!("/?q={encoded}");

        let mut buf = match ResponseBuffer::with_capacity(self.settings.buffer_capacity) {
            Ok(buf) => buf,
            Err(e) => {
                out.push_str("Error: Out of memory");
                return Err(e);
            }
        };

        // the only branch point: one strategy per call
        let status = match self.select_transport() {
            Ok(transport) => {
                debug!("using {} transport", transport.name());
                transport.fetch(&path, credential, &mut buf).await
            }
            Err(e) => Err(e),
        };

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                warn!("search exchange failed: {e}");
                out.push_str("Error: Search request failed");
                return Err(e);
            }
        };

        if status != 200 {
            error!("search API returned {status}");
            out.push_str("Error: Search request failed");
            return Err(SearchError::Transport(format!("remote status {status}")));
        }

        format::format_results(&buf.as_text(), out);
        debug!("search complete, {} byte report", out.len());
        Ok(())
    }

    fn select_transport(&self) -> Result<Box<dyn Transport>, SearchError> {
        if self.settings.use_proxy {
            Ok(Box::new(ProxiedTransport::new(&self.settings)))
        } else {
            Ok(Box::new(DirectTransport::new(&self.settings)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn empty_credential_store(name: &str) -> CredentialStore {
        let path = std::env::temp_dir()
            .join(format!("mdsearch-orch-{}-{}", name, std::process::id()))
            .join("api_key");
        CredentialStore::with_path(path)
    }

    #[tokio::test]
    async fn test_no_credential_is_terminal() {
        let client = SearchClient::new(Settings::default(), empty_credential_store("nokey"));
        let mut out = ReportBuffer::new(4096);

        let err = client
            .execute(r#"{"query": "rust"}"#, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NoCredential));
        assert_eq!(
            out.as_str(),
            "Error: No search API key configured. Set one with 'mdsearch set-key <KEY>'."
        );
    }

    #[tokio::test]
    async fn test_invalid_json_rejected_before_any_io() {
        let mut credential = empty_credential_store("badjson");
        credential.set("sk-test").unwrap();
        let client = SearchClient::new(Settings::default(), credential);
        let mut out = ReportBuffer::new(4096);

        let err = client.execute("not json", &mut out).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
        assert_eq!(out.as_str(), "Error: Invalid input JSON");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let mut credential = empty_credential_store("emptyq");
        credential.set("sk-test").unwrap();
        let client = SearchClient::new(Settings::default(), credential);
        let mut out = ReportBuffer::new(4096);

        let err = client
            .execute(r#"{"query": ""}"#, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
        assert_eq!(out.as_str(), "Error: Missing 'query' field");
    }

    #[test]
    fn test_set_credential_reaches_store() {
        let mut client = SearchClient::new(Settings::default(), empty_credential_store("setkey"));
        client.set_credential("sk-new").unwrap();
        assert_eq!(client.credential.get(), Some("sk-new"));
    }
}
