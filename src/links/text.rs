// src/links/text.rs
// =============================================================================
// Text-only emails have no anchors, just bare URLs. To search them the same
// way as HTML bodies we render the text as HTML first: every URL becomes an
// <a href="..."> element and everything else is escaped.
//
// We use the `linkify` crate to find the URLs in free text.
// =============================================================================

use linkify::{LinkFinder, LinkKind};

// Renders plain text as HTML with every URL wrapped in an anchor
//
// Example:
//   text   = "Report: https://example.com/r.json"
//   result = r#"Report: <a href="https://example.com/r.json">https://example.com/r.json</a>"#
pub fn text_to_html(text: &str) -> String {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);

    let mut html = String::with_capacity(text.len());
    for span in finder.spans(text) {
        match span.kind() {
            Some(LinkKind::Url) => {
                let url = escape(span.as_str());
                html.push_str(&format!(r#"<a href="{url}">{url}</a>"#));
            }
            _ => html.push_str(&escape(span.as_str())),
        }
    }
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::extract_links;

    #[test]
    fn test_wraps_urls_in_anchors() {
        let html = text_to_html("Report: https://example.com/r.json");
        assert_eq!(
            html,
            r#"Report: <a href="https://example.com/r.json">https://example.com/r.json</a>"#
        );
    }

    #[test]
    fn test_links_are_found_in_rendered_text() {
        let text = "First https://a.example/one.json\nthen http://b.example/page";
        let links = extract_links(&text_to_html(text));
        assert_eq!(
            links,
            vec!["https://a.example/one.json", "http://b.example/page"]
        );
    }

    #[test]
    fn test_escapes_markup_in_text() {
        let html = text_to_html(r#"<b>not html</b> href="nope""#);
        assert_eq!(html, "&lt;b&gt;not html&lt;/b&gt; href=&quot;nope&quot;");
        assert!(extract_links(&html).is_empty());
    }

    #[test]
    fn test_text_without_urls() {
        assert_eq!(text_to_html("hello there"), "hello there");
        assert_eq!(text_to_html(""), "");
    }
}
