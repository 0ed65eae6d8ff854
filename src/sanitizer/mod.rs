use ammonia::{Builder, UrlRelative};

const ALLOWED_TAGS: &[&str] = &[
    "h3", "h4", "figure", "a", "p", "b", "i", "em", "strong", "blockquote", "ul", "ol", "li",
    "dl", "dt", "dd", "sup", "sub",
];

const URL_SCHEMES: &[&str] = &["mailto", "http", "https"];

/// Restricts feed markup to a small allow-list suitable for inlining.
pub struct Sanitizer {
    policy: Builder<'static>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut policy = Builder::empty();
        policy
            .add_tags(ALLOWED_TAGS)
            .add_tag_attributes("a", &["href"])
            .add_url_schemes(URL_SCHEMES)
            .url_relative(UrlRelative::Deny)
            .add_clean_content_tags(&["script", "style"])
            .link_rel(Some("nofollow noopener noreferrer"))
            .set_tag_attribute_value("a", "target", "_blank");

        Self { policy }
    }

    pub fn sanitize(&self, markup: &str) -> String {
        if markup.is_empty() {
            return String::new();
        }
        self.policy.clean(markup).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(Sanitizer::new().sanitize(""), "");
    }

    #[test]
    fn test_keeps_allowed_markup() {
        let out = Sanitizer::new().sanitize("<p>Hello <em>world</em></p><ul><li>one</li></ul>");
        assert_eq!(out, "<p>Hello <em>world</em></p><ul><li>one</li></ul>");
    }

    #[test]
    fn test_strips_disallowed_elements_and_attributes() {
        let out = Sanitizer::new()
            .sanitize("<div class=\"x\"><p style=\"color:red\">text</p><img src=\"a.png\"></div>");
        assert_eq!(out, "<p>text</p>");
    }

    #[test]
    fn test_drops_script_content() {
        let out = Sanitizer::new().sanitize("<p>ok</p><script>alert(1)</script>");
        assert_eq!(out, "<p>ok</p>");
    }

    #[test]
    fn test_links_keep_href_only_and_gain_safety_attributes() {
        let out = Sanitizer::new()
            .sanitize("<a href=\"https://example.com/\" onclick=\"evil()\" title=\"t\">x</a>");

        assert!(out.contains("href=\"https://example.com/\""));
        assert!(out.contains("rel=\"nofollow noopener noreferrer\""));
        assert!(out.contains("target=\"_blank\""));
        assert!(!out.contains("onclick"));
        assert!(!out.contains("title"));
    }

    #[test]
    fn test_relative_links_lose_href() {
        let out = Sanitizer::new().sanitize("<p><a href=\"/posts/2\">next</a></p>");

        assert!(!out.contains("href"));
        assert!(!out.contains("/posts/2"));
        assert!(out.contains(">next</a>"));
    }

    #[test]
    fn test_rejects_javascript_urls() {
        let out = Sanitizer::new().sanitize("<a href=\"javascript:alert(1)\">x</a>");
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn test_markup_reduced_to_nothing() {
        assert_eq!(Sanitizer::new().sanitize("<script>alert(1)</script>"), "");
    }
}
