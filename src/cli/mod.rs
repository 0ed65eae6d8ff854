pub mod commands;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{
    RunOptions, DEFAULT_FEEDS_PATH, DEFAULT_MAX_ARTICLES, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "estuary")]
#[command(about = "Aggregate feeds into static HTML pages", long_about = None)]
pub struct Cli {
    /// File listing the pages and their feed URLs (.json or .toml)
    #[arg(long, default_value = DEFAULT_FEEDS_PATH)]
    pub feeds: PathBuf,

    /// Maximum number of articles to display per page
    #[arg(long, default_value_t = DEFAULT_MAX_ARTICLES)]
    pub max_articles: usize,

    /// Directory for rendered pages and the fetch cache
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Per-request fetch timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            feeds_path: self.feeds.clone(),
            output_dir: self.output.clone(),
            timeout: Duration::from_secs(self.timeout),
            max_articles: self.max_articles,
            verbose: self.verbose,
        }
    }
}
