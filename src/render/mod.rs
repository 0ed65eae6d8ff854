use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;

use crate::app::{EstuaryError, Result};
use crate::domain::Page;

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'p, 'a> {
    page: &'p Page<'a>,
}

/// Render `page` to an HTML string.
pub fn render(page: &Page<'_>) -> Result<String> {
    PageTemplate { page }
        .render()
        .map_err(|e| EstuaryError::Render {
            page: page.name.clone(),
            source: e,
        })
}

/// Render `page` into `<output_dir>/<name>.html`, replacing any previous file.
pub fn write_page(page: &Page<'_>, output_dir: &Path) -> Result<PathBuf> {
    let html = render(page)?;
    let path = output_dir.join(page.file_name());

    fs::write(&path, html).map_err(|e| EstuaryError::WriteOutput {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::domain::Article;
    use chrono::{Local, TimeZone, Utc};

    fn pages() -> Vec<PageConfig> {
        vec![
            PageConfig {
                name: "index".into(),
                title: "News".into(),
                urls: vec![],
            },
            PageConfig {
                name: "tech".into(),
                title: "Tech <&> Stuff".into(),
                urls: vec![],
            },
        ]
    }

    fn article(title: &str, content: &str) -> Article {
        Article {
            title: title.into(),
            url: "https://example.com/post".into(),
            feed_title: "Example".into(),
            feed_url: "https://example.com/".into(),
            content: content.into(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
            formatted_time: "Tuesday 2 Jan 00:00".into(),
        }
    }

    #[test]
    fn test_render_lists_articles_in_order() {
        let pages = pages();
        let page = Page::new(
            &pages[0],
            &pages,
            vec![article("First", "<p>one</p>"), article("Second", "<p>two</p>")],
            Local::now(),
        );

        let html = render(&page).unwrap();

        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.contains("<p>one</p>"));
        assert!(html.contains("Tuesday 2 Jan 00:00"));
        assert!(html.contains("href=\"tech.html\""));
    }

    #[test]
    fn test_render_escapes_titles() {
        let pages = pages();
        let page = Page::new(
            &pages[1],
            &pages,
            vec![article("<b>bold</b>", "")],
            Local::now(),
        );

        let html = render(&page).unwrap();

        assert!(
            html.contains("Tech &#60;&#38;&#62; Stuff")
                || html.contains("Tech &lt;&amp;&gt; Stuff")
        );
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_write_page_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let pages = pages();
        let page = Page::new(&pages[0], &pages, Vec::new(), Local::now());

        let path = write_page(&page, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("index.html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("<title>News</title>"));
    }

    #[test]
    fn test_write_page_into_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let pages = pages();
        let page = Page::new(&pages[0], &pages, Vec::new(), Local::now());

        let err = write_page(&page, &dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, EstuaryError::WriteOutput { .. }));
    }
}
