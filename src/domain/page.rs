use chrono::{DateTime, Local};

use crate::config::PageConfig;
use crate::domain::article::{format_time, Article};

/// A fully aggregated page, ready for the renderer.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub title: String,
    pub name: String,
    pub fetched_at: DateTime<Local>,
    pub formatted_fetch_time: String,
    /// Every configured page, for navigation.
    pub pages: &'a [PageConfig],
    pub articles: Vec<Article>,
}

impl<'a> Page<'a> {
    pub fn new(
        config: &PageConfig,
        pages: &'a [PageConfig],
        articles: Vec<Article>,
        fetched_at: DateTime<Local>,
    ) -> Self {
        Self {
            title: config.title.clone(),
            name: config.name.clone(),
            formatted_fetch_time: format_time(&fetched_at),
            fetched_at,
            pages,
            articles,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.name)
    }
}
