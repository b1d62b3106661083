// src/fetch/mod.rs
// =============================================================================
// This module reads raw content from wherever a target points.
//
// A target is either:
// - an HTTP(S) URL, fetched with reqwest (see http.rs)
// - a file:// URL or a local filesystem path, read from disk (see local.rs)
//
// Everything above this module talks to the `Fetch` trait, so the resolver
// can be tested against an in-memory fetcher instead of the network.
// =============================================================================

mod http;
mod local;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use http::is_http_url;
pub use local::clean_local_path;

/// Browser-like user agent; some hosts refuse requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Largest response body read from the network by default (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// A target could not be read.
///
/// Only the target is carried; the cause is logged where it happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to fetch {target}")]
pub struct FetchError {
    pub target: String,
}

impl FetchError {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// Content read from a target.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    pub body: Vec<u8>,
    /// The declared Content-Type, when the source has one (HTTP only)
    pub content_type: Option<String>,
}

impl Fetched {
    pub fn is_declared_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// Anything that can turn a target string into bytes.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<Fetched, FetchError>>;
}

// Options for building a ContentFetcher
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Responses with a larger body are treated as failed fetches
    pub max_body_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

// The real fetcher: network for http(s) targets, disk for everything else
//
// The reqwest Client is built once and reused for every request
// (it keeps a connection pool internally).
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl ContentFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(options.max_redirects))
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            max_body_bytes: options.max_body_bytes,
        })
    }
}

impl Fetch for ContentFetcher {
    fn fetch<'a>(&'a self, target: &'a str) -> BoxFuture<'a, Result<Fetched, FetchError>> {
        async move {
            if is_http_url(target) {
                http::fetch_url(&self.client, target, self.max_body_bytes).await
            } else if target.starts_with("file://") {
                local::read_file_url(target).await
            } else {
                local::read_local_path(target).await
            }
        }
        .boxed()
    }
}

// Works out the URL that relative links found in a target resolve against
//
// Examples:
//   "https://example.com/mail/message.eml" -> that URL
//   "file:///tmp/message.eml"              -> that URL
//   "./mail/message.eml"                   -> file:///<cwd>/mail/message.eml
pub fn target_base_url(target: &str) -> Option<Url> {
    if is_http_url(target) || target.starts_with("file://") {
        return Url::parse(target).ok();
    }
    let path = std::path::absolute(clean_local_path(target)).ok()?;
    Url::from_file_path(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_json() {
        let fetched = Fetched {
            body: Vec::new(),
            content_type: Some("Application/JSON; charset=utf-8".to_string()),
        };
        assert!(fetched.is_declared_json());

        let html = Fetched {
            body: Vec::new(),
            content_type: Some("text/html".to_string()),
        };
        assert!(!html.is_declared_json());
        assert!(!Fetched::default().is_declared_json());
    }

    #[test]
    fn test_base_url_for_http_target() {
        let base = target_base_url("https://example.com/mail/message.eml").unwrap();
        assert_eq!(base.as_str(), "https://example.com/mail/message.eml");
    }

    #[test]
    fn test_base_url_for_local_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.eml");
        let quoted = format!("\"{}\"", path.display());

        let base = target_base_url(&quoted).unwrap();
        assert_eq!(base.scheme(), "file");
        assert_eq!(base.to_file_path().unwrap(), path);
    }

    #[tokio::test]
    async fn test_content_fetcher_reads_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, br#"{"a":1}"#).unwrap();

        let fetcher = ContentFetcher::new(&FetchOptions::default()).unwrap();

        let by_path = fetcher.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(by_path.body, br#"{"a":1}"#);
        assert_eq!(by_path.content_type, None);

        let url = Url::from_file_path(&path).unwrap();
        let by_url = fetcher.fetch(url.as_str()).await.unwrap();
        assert_eq!(by_url.body, br#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_missing_file_is_a_fetch_error() {
        let fetcher = ContentFetcher::new(&FetchOptions::default()).unwrap();
        let err = fetcher.fetch("/definitely/not/here.eml").await.unwrap_err();
        assert_eq!(err, FetchError::new("/definitely/not/here.eml"));
    }
}
