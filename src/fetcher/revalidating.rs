use chrono::Utc;

use crate::app::Result;
use crate::fetcher::{FetchResult, Fetcher};
use crate::store::{CacheEntry, CacheStore};

/// Fetches through a [`CacheStore`], replaying each URL's last revalidation
/// tokens as preconditions.
pub struct RevalidatingFetcher {
    transport: Box<dyn Fetcher + Send + Sync>,
    cache: CacheStore,
}

impl RevalidatingFetcher {
    pub fn new(transport: Box<dyn Fetcher + Send + Sync>, cache: CacheStore) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut CacheStore {
        &mut self.cache
    }

    /// Current body for `url`.
    ///
    /// A 304 returns the cached body and leaves the entry untouched,
    /// including its timestamp. A 2xx replaces the entry. Errors leave the
    /// cache as it was.
    pub async fn fetch(&mut self, url: &str) -> Result<String> {
        let (etag, last_modified) = match self.cache.get(url) {
            Some(entry) => (non_empty(&entry.etag), non_empty(&entry.last_modified)),
            None => (None, None),
        };

        let result = self
            .transport
            .fetch(url, etag.as_deref(), last_modified.as_deref())
            .await?;

        match result {
            FetchResult::NotModified => {
                tracing::debug!("Feed {} not modified", url);
                Ok(self
                    .cache
                    .get(url)
                    .map(|entry| entry.body.clone())
                    .unwrap_or_default())
            }
            FetchResult::Content {
                body,
                etag,
                last_modified,
            } => {
                let entry =
                    CacheEntry::from_response(body.clone(), etag, last_modified, Utc::now());
                self.cache.put(url, entry);
                Ok(body)
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
