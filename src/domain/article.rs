use std::cmp::Ordering;
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::normalizer::ParsedItem;
use crate::sanitizer::Sanitizer;

/// Display layout shared by article and fetch times, e.g. "Monday 2 Jan 15:04".
pub const TIME_FORMAT: &str = "%A %-d %b %H:%M";

pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format(TIME_FORMAT).to_string()
}

/// One feed entry, normalized for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub feed_title: String,
    pub feed_url: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    pub formatted_time: String,
}

impl Article {
    /// Build an article from a parsed entry and its feed's provenance.
    ///
    /// The effective time is the published time, falling back to the
    /// updated time. Full content wins over the summary unless it sanitizes
    /// to nothing.
    pub fn from_item(
        item: ParsedItem,
        feed_title: &str,
        feed_url: &str,
        sanitizer: &Sanitizer,
    ) -> Self {
        let published_at = item.published.or(item.updated);

        let mut content = sanitizer.sanitize(item.content.as_deref().unwrap_or_default());
        if content.is_empty() {
            content = sanitizer.sanitize(item.summary.as_deref().unwrap_or_default());
        }

        Self {
            title: item.title,
            url: item.link,
            feed_title: feed_title.to_string(),
            feed_url: feed_url.to_string(),
            content,
            published_at,
            formatted_time: published_at
                .map(|t| format_time(&t.with_timezone(&Local)))
                .unwrap_or_default(),
        }
    }

    /// Newest first; undated articles sort after every dated one and keep
    /// their relative order among themselves.
    pub fn newest_first(a: &Article, b: &Article) -> Ordering {
        b.published_at.cmp(&a.published_at)
    }
}
