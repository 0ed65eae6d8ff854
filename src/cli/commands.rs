use std::fs;

use chrono::Local;

use crate::aggregator::Aggregator;
use crate::app::{AppContext, EstuaryError, Result};
use crate::config::FeedsConfig;
use crate::domain::Page;
use crate::render;

/// Totals for one complete pass over every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: usize,
    pub articles: usize,
    pub failed_feeds: usize,
}

/// Fetch, aggregate and render every configured page.
///
/// Configuration, output directory and rendering failures abort the run.
/// Cache load/save failures and individual feed failures are only logged.
pub async fn generate(ctx: &mut AppContext) -> Result<RunSummary> {
    let feeds = FeedsConfig::load(&ctx.options.feeds_path)?;
    let output_dir = ctx.options.output_dir.clone();

    fs::create_dir_all(&output_dir).map_err(|e| EstuaryError::OutputDir {
        path: output_dir.clone(),
        source: e,
    })?;

    let cache_path = ctx.options.cache_path();
    if let Err(e) = ctx.fetcher.cache_mut().load(&cache_path) {
        tracing::warn!("{}; starting with an empty cache", e);
    }

    let mut summary = RunSummary::default();

    for page_config in &feeds.pages {
        tracing::debug!(
            "Building page {} from {} feeds",
            page_config.name,
            page_config.urls.len()
        );

        let collected = Aggregator::new(
            &mut ctx.fetcher,
            &ctx.normalizer,
            &ctx.sanitizer,
            ctx.options.max_articles,
        )
        .aggregate(page_config)
        .await;

        summary.failed_feeds += collected.failed_feeds;
        summary.articles += collected.articles.len();

        let page = Page::new(page_config, &feeds.pages, collected.articles, Local::now());
        let path = render::write_page(&page, &output_dir)?;
        summary.pages += 1;

        tracing::info!("Wrote {} ({} articles)", path.display(), page.articles.len());
    }

    if let Err(e) = ctx.fetcher.cache().save(&cache_path) {
        tracing::warn!("{}", e);
    }

    tracing::info!(
        "Run complete: {} pages, {} articles, {} failed feeds",
        summary.pages,
        summary.articles,
        summary.failed_feeds
    );

    Ok(summary)
}
