use crate::app::error::Result;
use crate::config::RunOptions;
use crate::fetcher::{Fetcher, HttpFetcher, RevalidatingFetcher};
use crate::normalizer::Normalizer;
use crate::sanitizer::Sanitizer;
use crate::store::CacheStore;

pub struct AppContext {
    pub options: RunOptions,
    pub fetcher: RevalidatingFetcher,
    pub normalizer: Normalizer,
    pub sanitizer: Sanitizer,
}

impl AppContext {
    pub fn new(options: RunOptions) -> Result<Self> {
        let transport = HttpFetcher::new(options.timeout)?;
        Ok(Self::with_fetcher(options, Box::new(transport)))
    }

    /// Wire the context around an arbitrary transport, starting from an
    /// empty cache.
    pub fn with_fetcher(options: RunOptions, transport: Box<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            options,
            fetcher: RevalidatingFetcher::new(transport, CacheStore::new()),
            normalizer: Normalizer::new(),
            sanitizer: Sanitizer::new(),
        }
    }
}
