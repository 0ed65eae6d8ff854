//! Pages configuration and per-run options.
//!
//! The pages document is read once at startup. JSON is the default format;
//! a `.toml` file is read with the same shape (`[[pages]]` tables).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_FEEDS_PATH: &str = "feeds.json";
pub const DEFAULT_OUTPUT_DIR: &str = "html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ARTICLES: usize = 50;

/// One rendered page: a named group of feeds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageConfig {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// The whole pages document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedsConfig {
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

impl FeedsConfig {
    /// Load and validate the pages document at `path`.
    ///
    /// Any failure here is fatal to the run.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?,
            Some("toml") => Self::from_toml(&content).map_err(|e| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: e,
            })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Page names become output file names, so they must be plain and unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for page in &self.pages {
            let name = page.name.as_str();
            if name.is_empty()
                || name == "."
                || name.contains("..")
                || name.contains('/')
                || name.contains('\\')
            {
                return Err(ConfigError::InvalidPageName(page.name.clone()));
            }
            if !seen.insert(name) {
                return Err(ConfigError::DuplicatePageName(page.name.clone()));
            }
        }

        Ok(())
    }
}

/// Per-run tunables, threaded explicitly into the fetcher and aggregator.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub feeds_path: PathBuf,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub max_articles: usize,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            feeds_path: PathBuf::from(DEFAULT_FEEDS_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_articles: DEFAULT_MAX_ARTICLES,
            verbose: false,
        }
    }
}

impl RunOptions {
    /// Location of the cache snapshot inside the output directory.
    pub fn cache_path(&self) -> PathBuf {
        self.output_dir.join("cache.json")
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unsupported config format (expected .json or .toml): {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid page name: {0:?}")]
    InvalidPageName(String),

    #[error("Duplicate page name: {0}")]
    DuplicatePageName(String),
}
