use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::{EstuaryError, Result};

/// Revalidation state and last full body for one feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub body: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub etag: String,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    /// Build an entry from a full (2xx) response. Missing tokens are stored
    /// as empty strings.
    pub fn from_response(
        body: String,
        etag: Option<String>,
        last_modified: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            body,
            etag: etag.unwrap_or_default(),
            last_modified: last_modified.unwrap_or_default(),
            timestamp,
        }
    }
}

/// URL-keyed cache persisted as a single JSON snapshot.
///
/// Loaded once at startup, mutated by the revalidating fetcher and written
/// back whole at the end of the run. Single writer, no locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStore {
    entries: BTreeMap<String, CacheEntry>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the snapshot at `path`.
    ///
    /// A missing snapshot leaves the store empty and is not an error.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cache snapshot at {}", path.display());
                return Ok(());
            }
            Err(e) => {
                return Err(EstuaryError::CacheRead {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        self.entries = serde_json::from_slice(&bytes).map_err(|e| EstuaryError::CacheParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Loaded {} cache entries from {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Overwrite the snapshot at `path` with the current contents.
    ///
    /// The write is not atomic; a failure can leave a truncated file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(&self.entries).map_err(EstuaryError::CacheSerialize)?;

        fs::write(path, bytes).map_err(|e| EstuaryError::CacheWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Saved {} cache entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    pub fn get(&self, url: &str) -> Option<&CacheEntry> {
        self.entries.get(url)
    }

    pub fn put(&mut self, url: &str, entry: CacheEntry) {
        self.entries.insert(url.to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
