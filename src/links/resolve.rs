// src/links/resolve.rs
// =============================================================================
// Resolving an href found on a page into an absolute URL.
//
// Links in pages and emails are often relative ("report.json", "../data/"),
// so we join them against the URL of the content they were found in, the
// same way a browser does.
// =============================================================================

use url::Url;

// Resolves a possibly-relative href to an absolute URL
//
// Parameters:
//   base: the URL of the content the link was found in, if it has one
//   href: the raw href value
//
// Returns: Some(url), or None when the href can't be turned into a URL or
// points somewhere we don't follow from this base:
// - http/https links are always followed
// - file links only when the base itself is a local file
// - anything else (mailto:, javascript:, ftp:, ...) never
//
// Examples:
//   base = "https://example.com/mail/", href = "report.json"
//     -> Some("https://example.com/mail/report.json")
//   base = None, href = "https://other.com/x" -> Some("https://other.com/x")
//   base = None, href = "report.json" -> None
//   base = "https://example.com/", href = "file:///etc/app.json" -> None
pub fn resolve_link(base: Option<&Url>, href: &str) -> Option<Url> {
    let href = href.trim();
    let url = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    is_followable(base, &url).then_some(url)
}

fn is_followable(base: Option<&Url>, url: &Url) -> bool {
    match url.scheme() {
        "http" | "https" => true,
        "file" => base.is_some_and(|base| base.scheme() == "file"),
        _ => false,
    }
}

/// True when the URL's path ends in `.json` (query and fragment ignored).
pub fn is_json_url(url: &Url) -> bool {
    url.path().ends_with(".json")
}
