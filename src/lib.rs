//! # Estuary
//!
//! Aggregates many RSS/Atom feeds into static, per-page HTML article
//! listings, revalidating every feed against a local cache.
//!
//! ## Architecture
//!
//! ```text
//! RevalidatingFetcher → Normalizer → Sanitizer → Aggregator → Render
//!          ↕
//!      CacheStore (cache.json)
//! ```
//!
//! Pages are built one after another; within a page, feeds are fetched
//! sequentially and merged newest first, bounded by `--max-articles`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build html/<page>.html for every page in feeds.json
//! estuary
//!
//! # Custom config, output directory and limits
//! estuary --feeds pages.toml --output public --max-articles 20 --timeout 10 --verbose
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the run
/// options, revalidating fetcher, normalizer and sanitizer.
pub mod app;

/// Per-page aggregation: fetch, parse, normalize, sort and truncate.
pub mod aggregator;

/// Command-line interface using clap, and the run orchestration.
pub mod cli;

/// Pages document (`feeds.json` / `.toml`) and per-run options.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): one normalized feed entry
/// - [`Page`](domain::Page): an aggregated page handed to the renderer
pub mod domain;

/// HTTP fetching with conditional request support.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single conditional GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`RevalidatingFetcher`](fetcher::revalidating::RevalidatingFetcher): cache-backed wrapper
pub mod fetcher;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0
/// into [`ParsedFeed`](normalizer::ParsedFeed) values.
pub mod normalizer;

/// HTML output through askama templates.
pub mod render;

/// Allow-list HTML sanitization of feed content.
pub mod sanitizer;

/// On-disk fetch cache.
///
/// - [`CacheStore`](store::CacheStore): URL-keyed revalidation state
/// - [`CacheEntry`](store::CacheEntry): body, ETag, Last-Modified, timestamp
pub mod store;
