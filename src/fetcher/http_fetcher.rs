use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::app::{EstuaryError, Result};
use crate::fetcher::{FetchResult, Fetcher};

const USER_AGENT: &str = concat!("estuary/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(EstuaryError::HttpClient)?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Preconditions for a revalidating GET. Empty tokens are treated as absent.
pub fn conditional_headers(etag: Option<&str>, last_modified: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Some(etag) = etag.filter(|v| !v.is_empty()) {
        if let Ok(value) = HeaderValue::from_str(etag) {
            headers.insert(IF_NONE_MATCH, value);
        }
    }

    if let Some(last_modified) = last_modified.filter(|v| !v.is_empty()) {
        if let Ok(value) = HeaderValue::from_str(last_modified) {
            headers.insert(IF_MODIFIED_SINCE, value);
        }
    }

    headers
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// `text()` has already decoded the body to UTF-8 using the response charset,
/// so the XML declaration must stop naming the wire encoding or the feed
/// parser decodes it a second time.
pub fn declare_utf8(body: String) -> String {
    let start = match body.find("<?xml") {
        Some(i) if body[..i].trim_start_matches('\u{feff}').trim().is_empty() => i,
        _ => return body,
    };
    let end = match body[start..].find("?>") {
        Some(i) => start + i,
        None => return body,
    };
    let declaration = &body[start..end];
    let attr = match declaration.find("encoding") {
        Some(i) => i + "encoding".len(),
        None => return body,
    };

    let rest = declaration[attr..].trim_start();
    let Some(rest) = rest.strip_prefix('=') else {
        return body;
    };
    let rest = rest.trim_start();
    let quote = match rest.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return body,
    };

    let value_start = start + declaration.len() - rest.len() + 1;
    let value_end = match body[value_start..end].find(quote) {
        Some(i) => value_start + i,
        None => return body,
    };
    if body[value_start..value_end].eq_ignore_ascii_case("utf-8") {
        return body;
    }

    format!("{}UTF-8{}", &body[..value_start], &body[value_end..])
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<FetchResult> {
        let target = Url::parse(url).map_err(|e| EstuaryError::InvalidUrl {
            url: url.to_string(),
            source: e,
        })?;

        let response = self
            .client
            .get(target)
            .headers(conditional_headers(etag, last_modified))
            .send()
            .await
            .map_err(|e| EstuaryError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        tracing::debug!("{} ({})", status, url);

        if status == StatusCode::NOT_MODIFIED {
            return Ok(FetchResult::NotModified);
        }

        if !status.is_success() {
            return Err(EstuaryError::Status {
                url: url.to_string(),
                status,
            });
        }

        let etag = header_string(response.headers(), ETAG);
        let last_modified = header_string(response.headers(), LAST_MODIFIED);

        let body = response.text().await.map_err(|e| EstuaryError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

        Ok(FetchResult::Content {
            body: declare_utf8(body),
            etag,
            last_modified,
        })
    }
}
