// src/fetch/local.rs
// =============================================================================
// Reading targets from the local filesystem.
//
// Paths often arrive copy-pasted with quotes around them
// ("C:\Users\me\Downloads\mail.eml"), so one layer of quotes is stripped
// before the path is made absolute and read.
// =============================================================================

use super::{FetchError, Fetched};
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

const QUOTES: &[char] = &['"', '\''];

// Strips one leading and one trailing quote character (" or ')
//
// Examples:
//   "\"/tmp/a.eml\"" -> "/tmp/a.eml"
//   "'/tmp/a.eml"    -> "/tmp/a.eml"
//   "/tmp/a.eml"     -> "/tmp/a.eml"
pub fn clean_local_path(target: &str) -> &str {
    let path = target.strip_prefix(QUOTES).unwrap_or(target);
    path.strip_suffix(QUOTES).unwrap_or(path)
}

pub(super) async fn read_local_path(target: &str) -> Result<Fetched, FetchError> {
    let path = match std::path::absolute(clean_local_path(target)) {
        Ok(path) => path,
        Err(e) => {
            warn!(path = target, error = %e, "could not resolve path");
            return Err(FetchError::new(target));
        }
    };
    read(target, path).await
}

pub(super) async fn read_file_url(target: &str) -> Result<Fetched, FetchError> {
    let path = Url::parse(target)
        .ok()
        .and_then(|url| url.to_file_path().ok());
    match path {
        Some(path) => read(target, path).await,
        None => {
            warn!(path = target, "not a usable file URL");
            Err(FetchError::new(target))
        }
    }
}

async fn read(target: &str, path: PathBuf) -> Result<Fetched, FetchError> {
    debug!(path = %path.display(), "reading file");
    match tokio::fs::read(&path).await {
        Ok(body) => Ok(Fetched {
            body,
            content_type: None,
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file");
            Err(FetchError::new(target))
        }
    }
}
