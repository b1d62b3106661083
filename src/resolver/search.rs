// src/resolver/search.rs
// =============================================================================
// This module implements the recursive JSON search.
//
// How it works, for a target and a remaining depth:
// 1. Depth 0: stop, nothing found (this is what ends cyclic link graphs)
// 2. Fetch the target
// 3. Declared as application/json: parse it and return it
// 4. Content parses as JSON anyway: return it
// 5. Otherwise extract links from the content and recurse with depth - 1:
//    a. first only the links whose path ends in .json
//    b. then, if depth > 1, every link
// 6. Nothing worked: not found
//
// Every step is sequential: candidates are tried one after the other and the
// first JSON found is returned without touching the rest.
// =============================================================================

use crate::fetch::{target_base_url, Fetch, FetchError};
use crate::links::{extract_links, is_json_url, resolve_link};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Why a single branch of the search failed.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The target said it was JSON but wasn't
    #[error("{target} is declared as JSON but does not parse: {source}")]
    InvalidJson {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Fetch every target at most once per search. Off by default: the
    /// depth limit alone bounds the search.
    pub skip_visited: bool,
}

// State shared by every branch of one search
struct Search {
    visited: Option<HashSet<String>>,
}

impl Search {
    fn new(options: ResolveOptions) -> Self {
        Self {
            visited: options.skip_visited.then(HashSet::new),
        }
    }

    // Returns false if the target was already fetched in this search
    fn visit(&mut self, target: &str) -> bool {
        match &mut self.visited {
            Some(visited) => visited.insert(target.to_string()),
            None => true,
        }
    }
}

/// Finds JSON by following links, fetching through `F`.
pub struct JsonResolver<F> {
    fetcher: F,
    options: ResolveOptions,
}

impl<F: Fetch> JsonResolver<F> {
    pub fn new(fetcher: F, options: ResolveOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Searches for JSON starting at `target`, following at most `depth` hops.
    ///
    /// Returns `Ok(None)` when nothing was found. An error means the target
    /// itself could not be fetched, or claimed to be JSON and wasn't; errors
    /// further down the link graph only make the search move on.
    pub async fn resolve(&self, target: &str, depth: u32) -> Result<Option<Value>, ResolveError> {
        let mut search = Search::new(self.options);
        self.resolve_in(target.to_string(), depth, &mut search).await
    }

    /// Tries each target in order with the full `depth`, returning the first
    /// JSON found. Failing targets are skipped.
    pub async fn resolve_first<I>(&self, targets: I, depth: u32) -> Option<Value>
    where
        I: IntoIterator<Item = String>,
    {
        let mut search = Search::new(self.options);
        for target in targets {
            if let Some(value) = self.try_candidate(target, depth, &mut search).await {
                return Some(value);
            }
        }
        None
    }

    // The recursion goes through a BoxFuture: an async fn can't await itself
    // directly because its future would have infinite size.
    fn resolve_in<'a>(
        &'a self,
        target: String,
        depth: u32,
        search: &'a mut Search,
    ) -> BoxFuture<'a, Result<Option<Value>, ResolveError>> {
        async move {
            if depth == 0 {
                return Ok(None);
            }
            if !search.visit(&target) {
                debug!(url = %target, "already visited");
                return Ok(None);
            }

            debug!(url = %target, depth, "resolving");
            let fetched = self.fetcher.fetch(&target).await?;

            if fetched.is_declared_json() {
                return serde_json::from_slice(&fetched.body)
                    .map(Some)
                    .map_err(|source| ResolveError::InvalidJson {
                        target: target.clone(),
                        source,
                    });
            }

            // Servers don't always label JSON correctly
            if let Ok(value) = serde_json::from_slice::<Value>(&fetched.body) {
                return Ok(Some(value));
            }

            let content = String::from_utf8_lossy(&fetched.body);
            let base = target_base_url(&target);
            let candidates: Vec<Url> = extract_links(&content)
                .iter()
                .filter_map(|href| resolve_link(base.as_ref(), href))
                .collect();
            debug!(url = %target, links = candidates.len(), "following links");

            for url in candidates.iter().filter(|url| is_json_url(url)) {
                if let Some(value) = self.try_candidate(url.to_string(), depth - 1, search).await {
                    return Ok(Some(value));
                }
            }

            if depth > 1 {
                for url in &candidates {
                    if let Some(value) =
                        self.try_candidate(url.to_string(), depth - 1, search).await
                    {
                        return Ok(Some(value));
                    }
                }
            }

            Ok(None)
        }
        .boxed()
    }

    // One candidate link: errors are logged and count as "not found"
    async fn try_candidate(&self, target: String, depth: u32, search: &mut Search) -> Option<Value> {
        match self.resolve_in(target.clone(), depth, search).await {
            Ok(found) => found,
            Err(e) => {
                debug!(url = %target, error = %e, "candidate failed, trying the next one");
                None
            }
        }
    }
}
