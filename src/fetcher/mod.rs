pub mod http_fetcher;
pub mod revalidating;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use revalidating::RevalidatingFetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// New content fetched successfully
    Content {
        body: String,
        etag: Option<String>,
        last_modified: Option<String>,
    },
    /// Content not modified (HTTP 304)
    NotModified,
}

/// One conditional GET. Implementations never retry.
#[async_trait]
pub trait Fetcher {
    async fn fetch(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<FetchResult>;
}
