// src/email/parse.rs
// =============================================================================
// Parsing an email with mailparse.
//
// How parts are classified (leaves of the MIME tree, depth-first):
// - a part with a filename, or with "Content-Disposition: attachment",
//   is an attachment
// - otherwise the first text/html part is the HTML body and the first
//   text/plain part is the text body
// =============================================================================

use mailparse::{DispositionType, ParsedMail};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while parsing an email
#[derive(Debug, Error)]
pub enum ParseError {
    /// The MIME structure could not be parsed
    #[error("failed to parse email structure: {0}")]
    Structure(String),
}

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    /// Content with the transfer encoding (base64, quoted-printable) removed
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn is_json_named(&self) -> bool {
        self.filename.ends_with(".json")
    }
}

/// The parts of a parsed email the JSON search looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDocument {
    pub attachments: Vec<Attachment>,
    pub body_html: Option<String>,
    pub body_text: Option<String>,
}

/// Parse raw email bytes into an [`EmailDocument`]
pub fn parse_email(raw: &[u8]) -> Result<EmailDocument, ParseError> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| ParseError::Structure(e.to_string()))?;

    let mut document = EmailDocument::default();
    collect_parts(&parsed, &mut document);

    debug!(
        attachments = document.attachments.len(),
        has_html = document.body_html.is_some(),
        has_text = document.body_text.is_some(),
        "parsed email"
    );

    Ok(document)
}

fn collect_parts(part: &ParsedMail, document: &mut EmailDocument) {
    if !part.subparts.is_empty() {
        for sub in &part.subparts {
            collect_parts(sub, document);
        }
        return;
    }

    let disposition = part.get_content_disposition();
    let filename = disposition
        .params
        .get("filename")
        .or_else(|| part.ctype.params.get("name"))
        .cloned();

    if filename.is_some() || matches!(disposition.disposition, DispositionType::Attachment) {
        match part.get_body_raw() {
            Ok(content) => document.attachments.push(Attachment {
                filename: filename.unwrap_or_default(),
                content,
            }),
            Err(e) => debug!(error = %e, "skipping undecodable attachment"),
        }
        return;
    }

    let mimetype = part.ctype.mimetype.to_lowercase();
    let slot = if mimetype == "text/html" {
        &mut document.body_html
    } else if mimetype == "text/plain" {
        &mut document.body_text
    } else {
        return;
    };

    if slot.is_none() {
        match part.get_body() {
            Ok(body) => *slot = Some(body),
            Err(e) => debug!(error = %e, mimetype, "skipping undecodable body part"),
        }
    }
}
