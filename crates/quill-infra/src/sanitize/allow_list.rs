//! Allow-list sanitizer built on ammonia.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use quill_core::ports::HtmlSanitizer;

/// Tags that survive sanitization; everything else is stripped, keeping
/// only its text content (`<script>`/`<style>` lose their content too).
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "b", "br", "div", "dl", "dt", "em", "h1", "h2", "h3", "h4",
    "h5", "h6", "hr", "i", "img", "li", "ol", "p", "pre", "q", "s", "small", "strike", "span",
    "sub", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "tt", "u", "ul",
];

/// Allow-list HTML sanitizer.
///
/// Anchors keep `href`, `target` and `title`; images keep `src`, `alt`,
/// `width` and `height`. No other attribute survives on any tag.
pub struct AllowListSanitizer {
    builder: Builder<'static>,
}

impl AllowListSanitizer {
    pub fn new() -> Self {
        let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
        tag_attributes.insert("a", ["href", "target", "title"].into_iter().collect());
        tag_attributes.insert("img", ["src", "alt", "width", "height"].into_iter().collect());

        let mut builder = Builder::default();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .generic_attributes(HashSet::new())
            // `rel` is not in the allow-list, so don't have ammonia add it.
            .link_rel(None);

        Self { builder }
    }
}

impl Default for AllowListSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSanitizer for AllowListSanitizer {
    fn sanitize(&self, raw_html: &str) -> String {
        self.builder.clean(raw_html).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_dropped_allowed_tags_survive() {
        let sanitizer = AllowListSanitizer::new();
        let cleaned = sanitizer.sanitize("<script>alert(1)</script><b>hi</b>");
        assert_eq!(cleaned, "<b>hi</b>");
    }

    #[test]
    fn test_unknown_tags_are_unwrapped_but_text_survives() {
        let sanitizer = AllowListSanitizer::new();
        assert_eq!(sanitizer.sanitize("<blink>hello</blink>"), "hello");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let sanitizer = AllowListSanitizer::new();
        assert_eq!(sanitizer.sanitize("nice post"), "nice post");
    }

    #[test]
    fn test_event_handler_attributes_are_stripped() {
        let sanitizer = AllowListSanitizer::new();
        let cleaned =
            sanitizer.sanitize(r#"<a href="https://example.com" onclick="steal()">link</a>"#);
        assert_eq!(cleaned, r#"<a href="https://example.com">link</a>"#);
    }

    #[test]
    fn test_image_keeps_its_allowed_attributes() {
        let sanitizer = AllowListSanitizer::new();
        let cleaned =
            sanitizer.sanitize(r#"<img src="cover.jpg" alt="cover" width="10" height="20">"#);
        assert!(cleaned.contains(r#"src="cover.jpg""#));
        assert!(cleaned.contains(r#"alt="cover""#));
        assert!(cleaned.contains(r#"width="10""#));
        assert!(cleaned.contains(r#"height="20""#));
    }

    #[test]
    fn test_style_attributes_are_stripped() {
        let sanitizer = AllowListSanitizer::new();
        assert_eq!(
            sanitizer.sanitize(r#"<p style="color:red">x</p><h2>Title</h2>"#),
            "<p>x</p><h2>Title</h2>"
        );
    }
}
