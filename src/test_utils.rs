// src/test_utils.rs
// =============================================================================
// Test helpers shared by the module tests.
//
// MemoryFetcher stands in for the network: targets map to canned responses,
// anything else fails like an unreachable host, and every fetch is recorded
// so tests can check what the resolver touched and in which order.
// =============================================================================

#![cfg(test)]

use crate::fetch::{Fetch, FetchError, Fetched};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct MemoryFetcher {
    pages: HashMap<String, Fetched>,
    fetched: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, target: &str, content_type: Option<&str>, body: &[u8]) -> Self {
        self.pages.insert(
            target.to_string(),
            Fetched {
                body: body.to_vec(),
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    pub(crate) fn with_json(self, target: &str, body: &str) -> Self {
        self.with(target, Some("application/json"), body.as_bytes())
    }

    pub(crate) fn with_html(self, target: &str, body: &str) -> Self {
        self.with(target, Some("text/html; charset=utf-8"), body.as_bytes())
    }

    // Every target fetched so far, in order
    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Fetch for MemoryFetcher {
    fn fetch<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<Fetched, FetchError>> {
        async move {
            self.fetched.lock().unwrap().push(target.to_string());
            self.pages
                .get(target)
                .cloned()
                .ok_or_else(|| FetchError::new(target))
        }
        .boxed()
    }
}
