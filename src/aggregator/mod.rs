//! Merges every feed of a page into one time-ordered, bounded list.

use crate::config::PageConfig;
use crate::domain::Article;
use crate::fetcher::RevalidatingFetcher;
use crate::normalizer::Normalizer;
use crate::sanitizer::Sanitizer;

/// Articles for one page plus the number of feeds that were skipped.
#[derive(Debug, Clone, Default)]
pub struct PageArticles {
    pub articles: Vec<Article>,
    pub failed_feeds: usize,
}

pub struct Aggregator<'a> {
    fetcher: &'a mut RevalidatingFetcher,
    normalizer: &'a Normalizer,
    sanitizer: &'a Sanitizer,
    max_articles: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        fetcher: &'a mut RevalidatingFetcher,
        normalizer: &'a Normalizer,
        sanitizer: &'a Sanitizer,
        max_articles: usize,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            sanitizer,
            max_articles,
        }
    }

    /// Fetch the page's feeds one after another and fold their entries
    /// together. A feed that fails to fetch or parse is logged and skipped.
    pub async fn aggregate(&mut self, page: &PageConfig) -> PageArticles {
        let mut result = PageArticles::default();

        for url in &page.urls {
            let body = match self.fetcher.fetch(url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Skipping feed: {}", e);
                    result.failed_feeds += 1;
                    continue;
                }
            };

            let feed = match self.normalizer.normalize(url, &body) {
                Ok(feed) => feed,
                Err(e) => {
                    tracing::warn!("Skipping feed: {}", e);
                    result.failed_feeds += 1;
                    continue;
                }
            };

            let count = feed.items.len();
            result.articles.extend(
                feed.items
                    .into_iter()
                    .map(|item| Article::from_item(item, &feed.title, &feed.link, self.sanitizer)),
            );
            tracing::debug!("Collected {} articles from {}", count, url);
        }

        sort_and_truncate(&mut result.articles, self.max_articles);
        result
    }
}

/// Stable newest-first sort, then keep the first `max_articles`.
pub fn sort_and_truncate(articles: &mut Vec<Article>, max_articles: usize) {
    articles.sort_by(Article::newest_first);
    articles.truncate(max_articles);
}
