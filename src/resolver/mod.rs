// src/resolver/mod.rs
// =============================================================================
// This module searches a graph of links for a JSON document.
//
// Features:
// - Depth-limited recursive search starting from one or more targets
// - .json links are tried before any other link on a page
// - The first JSON found wins and stops the whole search
// - A broken link never aborts the search, the next candidate is tried
// =============================================================================

mod search;

pub use search::{JsonResolver, ResolveError, ResolveOptions};
