// src/service.rs
// =============================================================================
// The request flow behind /mail/parse-email (and the `extract` command):
//
// 1. Read the email from its path or URL
// 2. Parse it
// 3. Return the first .json attachment that actually parses
// 4. Otherwise follow the links in the email body with the JsonResolver
//
// Only steps 1 and 2 can fail hard. Everything after that is a search where
// a bad attachment or a dead link just means "try the next one".
// =============================================================================

use crate::email::{parse_email, EmailDocument, ParseError};
use crate::fetch::{target_base_url, Fetch, FetchError};
use crate::links::{extract_links, resolve_link, text_to_html};
use crate::resolver::JsonResolver;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Link hops allowed from each link in the email body.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Email file path or URL is required")]
    MissingPath,

    #[error("Failed to read email from path or URL: {}", .0.target)]
    Fetch(#[from] FetchError),

    #[error("Failed to parse email: {0}")]
    Parse(#[from] ParseError),

    #[error("No JSON found in email attachments or links")]
    NoJsonFound,
}

/// Finds the JSON payload of an email.
///
/// `E` reads the email itself, `L` is used for every link followed from it;
/// they are separate so each can have its own timeout.
pub struct EmailJsonService<E, L> {
    email_fetcher: E,
    resolver: JsonResolver<L>,
    max_depth: u32,
}

impl<E: Fetch, L: Fetch> EmailJsonService<E, L> {
    pub fn new(email_fetcher: E, resolver: JsonResolver<L>, max_depth: u32) -> Self {
        Self {
            email_fetcher,
            resolver,
            max_depth,
        }
    }

    pub async fn extract(&self, target: &str) -> Result<Value, ExtractError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ExtractError::MissingPath);
        }

        let raw = self.email_fetcher.fetch(target).await?;
        let email = parse_email(&raw.body)?;

        if let Some(value) = json_from_attachments(&email) {
            info!(email = target, "found JSON in attachment");
            return Ok(value);
        }

        let base = target_base_url(target);
        let links: Vec<String> = body_links(&email)
            .iter()
            .filter_map(|href| resolve_link(base.as_ref(), href))
            .map(String::from)
            .collect();
        debug!(email = target, links = links.len(), "searching body links");

        match self.resolver.resolve_first(links, self.max_depth).await {
            Some(value) => {
                info!(email = target, "found JSON through links");
                Ok(value)
            }
            None => {
                info!(email = target, "no JSON found");
                Err(ExtractError::NoJsonFound)
            }
        }
    }
}

// First attachment named *.json whose content parses
fn json_from_attachments(email: &EmailDocument) -> Option<Value> {
    email
        .attachments
        .iter()
        .filter(|attachment| attachment.is_json_named())
        .find_map(|attachment| match serde_json::from_slice(&attachment.content) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(filename = %attachment.filename, error = %e, "attachment is not valid JSON");
                None
            }
        })
}

// Links in the HTML body, or in the text body when there is no HTML
fn body_links(email: &EmailDocument) -> Vec<String> {
    match (&email.body_html, &email.body_text) {
        (Some(html), _) => extract_links(html),
        (None, Some(text)) => extract_links(&text_to_html(text)),
        (None, None) => Vec::new(),
    }
}
