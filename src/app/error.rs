use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum EstuaryError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request failed for {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Feed parsing error for {url}: {message}")]
    FeedParse { url: String, message: String },

    #[error("Failed to read cache {path}: {source}")]
    CacheRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache {path}: {source}")]
    CacheParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialise cache: {0}")]
    CacheSerialize(#[source] serde_json::Error),

    #[error("Failed to save cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render page {page}: {source}")]
    Render {
        page: String,
        source: askama::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EstuaryError>;
