// src/links/href.rs
// =============================================================================
// This module extracts href attribute values from HTML (or any text).
//
// We deliberately don't parse a DOM here: the content we look at can be a
// half-broken HTML page, an email body, or plain text that happens to carry
// href="..." fragments. A regex scan never fails, keeps document order and
// keeps duplicates, which is exactly what the resolver wants.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// href="value" or href='value', attribute name in any case
static HREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=["']([^"']+)["']"#).unwrap());

// Extracts every href value from the content, in order of appearance
//
// Example:
//   content = r#"<a HREF="/a">A</a> <a href='b.json'>B</a> <a href="/a">A</a>"#
//   result  = ["/a", "b.json", "/a"]
pub fn extract_links(content: &str) -> Vec<String> {
    HREF_REGEX
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
