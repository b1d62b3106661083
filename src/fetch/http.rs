// src/fetch/http.rs
// =============================================================================
// Fetching remote targets over HTTP(S).
//
// The client (timeout, redirect limit, user agent) is configured once in
// ContentFetcher::new; this file only makes the GET request and classifies
// what came back. Any non-2xx answer counts as a failure, and so does a body
// larger than the configured limit.
// =============================================================================

use super::{FetchError, Fetched};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

// True when the target should go over the network (http:// or https://,
// scheme in any case)
pub fn is_http_url(target: &str) -> bool {
    let lower = target.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub(super) async fn fetch_url(
    client: &Client,
    url: &str,
    max_body_bytes: usize,
) -> Result<Fetched, FetchError> {
    let url = url.trim();
    debug!(url, "fetching");

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| fetch_failed(url, &e))?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if response
        .content_length()
        .is_some_and(|len| len > max_body_bytes as u64)
    {
        return Err(body_too_large(url, max_body_bytes));
    }

    // Content-Length can be missing or wrong, so count while reading too
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| fetch_failed(url, &e))? {
        if body.len() + chunk.len() > max_body_bytes {
            return Err(body_too_large(url, max_body_bytes));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Fetched { body, content_type })
}

fn body_too_large(url: &str, limit: usize) -> FetchError {
    warn!(url, limit, "response body too large");
    FetchError::new(url)
}

// Logs the reason a request failed and returns the opaque error
fn fetch_failed(url: &str, error: &reqwest::Error) -> FetchError {
    let reason = if error.is_timeout() {
        "request timed out"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_status() {
        "unsuccessful status"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    warn!(url, error = %error, "{reason}");
    FetchError::new(url)
}

#[cfg(test)]
mod tests {
    use super::super::{ContentFetcher, Fetch, FetchOptions};
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("HTTPS://example.com/mail.eml"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("/home/me/http://odd.eml"));
        assert!(!is_http_url("file:///tmp/mail.eml"));
    }

    #[tokio::test]
    async fn test_fetch_body_and_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"ok":true}"#, "application/json"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = ContentFetcher::new(&FetchOptions::default()).unwrap();
        let fetched = fetcher
            .fetch(&format!("{}/data.json", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(fetched.body, br#"{"ok":true}"#);
        assert!(fetched.is_declared_json());
    }

    #[tokio::test]
    async fn test_sends_user_agent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "mailjson-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hi"))
            .mount(&mock_server)
            .await;

        let options = FetchOptions {
            user_agent: "mailjson-test".to_string(),
            ..FetchOptions::default()
        };
        let fetcher = ContentFetcher::new(&options).unwrap();
        let fetched = fetcher.fetch(&mock_server.uri()).await.unwrap();
        assert_eq!(fetched.body, b"hi");
    }

    #[tokio::test]
    async fn test_error_status_is_a_fetch_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = ContentFetcher::new(&FetchOptions::default()).unwrap();
        let target = format!("{}/missing.json", mock_server.uri());
        let err = fetcher.fetch(&target).await.unwrap_err();
        assert_eq!(err.target, target);
    }

    #[tokio::test]
    async fn test_timeout_is_a_fetch_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let options = FetchOptions {
            timeout: Duration::from_millis(200),
            ..FetchOptions::default()
        };
        let fetcher = ContentFetcher::new(&options).unwrap();
        assert!(fetcher.fetch(&mock_server.uri()).await.is_err());
    }

    #[tokio::test]
    async fn test_body_size_limit() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(2048)))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/small"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(512)))
            .mount(&mock_server)
            .await;

        let options = FetchOptions {
            max_body_bytes: 1024,
            ..FetchOptions::default()
        };
        let fetcher = ContentFetcher::new(&options).unwrap();

        let big = format!("{}/big", mock_server.uri());
        assert_eq!(fetcher.fetch(&big).await.unwrap_err(), FetchError::new(&big));

        let small = fetcher
            .fetch(&format!("{}/small", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(small.body.len(), 512);
    }

    #[tokio::test]
    async fn test_redirect_limit() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loop"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
            .mount(&mock_server)
            .await;

        let fetcher = ContentFetcher::new(&FetchOptions::default()).unwrap();
        let target = format!("{}/loop", mock_server.uri());
        assert!(fetcher.fetch(&target).await.is_err());
    }
}
