//! Settings structure for the search client

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client settings.
///
/// Defaults target the hosted markdown search API; a YAML file or
/// `MDSEARCH_*` environment variables can override any field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Search API host
    pub search_host: String,
    /// Search API port (proxied path)
    pub search_port: u16,
    /// Route the exchange through the tunnel provider instead of the
    /// direct encrypted client. Evaluated once per call.
    pub use_proxy: bool,
    /// Overall request timeout in seconds (also the per-read timeout on
    /// the proxied path)
    pub timeout_seconds: u64,
    /// Per-chunk receive size in bytes
    pub chunk_size: usize,
    /// Response accumulator capacity in bytes
    pub buffer_capacity: usize,
    /// Report destination capacity in bytes
    pub report_capacity: usize,
    /// Override the direct-path base URL (tests point this at a local
    /// server; normally derived from `search_host`)
    pub base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_host: "s.jina.ai".to_string(),
            search_port: 443,
            use_proxy: false,
            timeout_seconds: 15,
            chunk_size: 4096,
            buffer_capacity: 32 * 1024,
            report_capacity: 4096,
            base_url: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (MDSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("MDSEARCH_HOST") {
            self.search_host = val;
        }
        if let Ok(val) = std::env::var("MDSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.search_port = port;
            }
        }
        if let Ok(val) = std::env::var("MDSEARCH_USE_PROXY") {
            self.use_proxy = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("MDSEARCH_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.timeout_seconds = secs;
            }
        }
        if let Ok(val) = std::env::var("MDSEARCH_BASE_URL") {
            self.base_url = Some(val);
        }
    }

    /// Base URL for the direct transport path
    pub fn base_url(&self) -> String {
        match self.base_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.search_host),
        }
    }
}
