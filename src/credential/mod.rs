//! API credential lifecycle
//!
//! The bearer secret for the search API lives for the whole process: it is
//! seeded from a build-time default, overridden by the persisted copy if
//! one exists, and mutable at runtime through [`CredentialStore::set`],
//! which updates the in-memory and persisted copies together.
//!
//! The store is plain owned state, not a global: the caller decides where
//! it lives. Access discipline is single-writer/multi-reader with no
//! internal locking; callers must not run `set` concurrently with a
//! search.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Build-time default credential, baked in at compile time if provided
const DEFAULT_KEY: Option<&str> = option_env!("MDSEARCH_DEFAULT_API_KEY");

/// Process-wide search API credential with persistent storage
#[derive(Debug)]
pub struct CredentialStore {
    key: Option<String>,
    path: PathBuf,
}

impl CredentialStore {
    /// Load the credential from the default per-user location.
    ///
    /// Priority: persisted copy, then build-time default, then unset.
    pub fn load() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdsearch")
            .join("api_key");
        Self::with_path(path)
    }

    /// Load the credential backed by an explicit storage path
    pub fn with_path(path: PathBuf) -> Self {
        let mut key = DEFAULT_KEY
            .filter(|k| !k.is_empty())
            .map(|k| k.to_string());

        // persisted copy takes priority over the build-time default
        if let Ok(stored) = std::fs::read_to_string(&path) {
            let stored = stored.trim();
            if !stored.is_empty() {
                key = Some(stored.to_string());
            }
        }

        if key.is_some() {
            info!("search API key configured");
        } else {
            warn!("no search API key; set one with 'mdsearch set-key <KEY>'");
        }

        Self { key, path }
    }

    /// The current credential, if any
    pub fn get(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether a credential is available for this process
    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Overwrite the credential, persisting it and updating the in-memory
    /// copy together.
    ///
    /// # Errors
    ///
    /// Fails if the persisted copy cannot be written; the in-memory copy
    /// is left unchanged in that case, so the two never diverge.
    pub fn set(&mut self, key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&self.path, key)
            .with_context(|| format!("writing {}", self.path.display()))?;

        self.key = Some(key.to_string());
        info!("search API key saved");
        Ok(())
    }
}
