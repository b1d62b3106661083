// src/links/mod.rs
// =============================================================================
// This module finds and resolves links inside fetched content.
//
// Submodules:
// - href: Pulls href attribute values out of HTML or text
// - text: Renders a plain-text email body as HTML with clickable links
// - resolve: Turns an href into an absolute URL and spots .json targets
// =============================================================================

mod href;
mod resolve;
mod text;

pub use href::extract_links;
pub use resolve::{is_json_url, resolve_link};
pub use text::text_to_html;
