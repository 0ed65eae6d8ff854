use chrono::{DateTime, Utc};
use feed_rs::model::Link;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{EstuaryError, Result};

/// Feed-level metadata plus entries, in document order.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: String,
    pub link: String,
    pub items: Vec<ParsedItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedItem {
    pub title: String,
    pub link: String,
    /// Full content markup, if the entry carries one.
    pub content: Option<String>,
    /// Summary or description markup.
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse RSS, Atom or JSON Feed text. `url` only labels errors.
    pub fn normalize(&self, url: &str, body: &str) -> Result<ParsedFeed> {
        let feed = parser::parse(body.as_bytes()).map_err(|e| EstuaryError::FeedParse {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| ParsedItem {
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default(),
                link: entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default(),
                content: entry.content.and_then(|c| c.body),
                summary: entry.summary.map(|s| s.content),
                published: entry.published.map(|dt| dt.with_timezone(&Utc)),
                updated: entry.updated.map(|dt| dt.with_timezone(&Utc)),
            })
            .collect();

        Ok(ParsedFeed {
            title: feed
                .title
                .map(|t| decode_html_entities(&t.content).to_string())
                .unwrap_or_default(),
            link: site_link(&feed.links),
            items,
        })
    }
}

/// Prefer the human-facing link over `rel="self"` and friends.
fn site_link(links: &[Link]) -> String {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test &amp; Feed</title>
    <link>https://example.com/</link>
    <description>A test feed</description>
    <item>
      <title>Test Item 1</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>This is item 1</description>
      <content:encoded><![CDATA[<p>Full item 1</p>]]></content:encoded>
    </item>
    <item>
      <title>Test Item 2</title>
      <link>https://example.com/item2</link>
      <guid>item-2</guid>
      <description>This is item 2</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <link rel="self" href="https://example.com/feed.atom"/>
  <link rel="alternate" href="https://example.com/blog"/>
  <id>urn:example:feed</id>
  <updated>2024-01-03T00:00:00Z</updated>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let feed = Normalizer::new()
            .normalize("https://example.com/feed.xml", RSS_SAMPLE)
            .unwrap();

        assert_eq!(feed.title, "Test & Feed");
        assert_eq!(feed.link, "https://example.com/");
        assert_eq!(feed.items.len(), 2);

        let first = &feed.items[0];
        assert_eq!(first.title, "Test Item 1");
        assert_eq!(first.link, "https://example.com/item1");
        assert_eq!(first.content.as_deref(), Some("<p>Full item 1</p>"));
        assert_eq!(first.summary.as_deref(), Some("This is item 1"));
        assert_eq!(
            first.published,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );

        let second = &feed.items[1];
        assert!(second.content.is_none());
        assert!(second.published.is_none());
    }

    #[test]
    fn test_parse_atom() {
        let feed = Normalizer::new()
            .normalize("https://example.com/feed.atom", ATOM_SAMPLE)
            .unwrap();

        assert_eq!(feed.title, "Atom Test Feed");
        assert_eq!(feed.link, "https://example.com/blog");
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].title, "Atom Entry 1");
        assert_eq!(feed.items[0].link, "https://example.com/atom1");
        assert_eq!(
            feed.items[0].updated,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_malformed_feed_is_parse_error() {
        let err = Normalizer::new()
            .normalize("https://example.com/broken.xml", "this is not a feed")
            .unwrap_err();

        match err {
            EstuaryError::FeedParse { url, .. } => {
                assert_eq!(url, "https://example.com/broken.xml")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_body_is_parse_error() {
        assert!(Normalizer::new().normalize("https://example.com/", "").is_err());
    }
}
