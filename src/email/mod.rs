// src/email/mod.rs
// =============================================================================
// This module turns raw email bytes into the few things we care about:
// the attachments (name + bytes) and the HTML / plain-text bodies.
//
// MIME parsing itself is done by the `mailparse` crate.
// =============================================================================

mod parse;

pub use parse::{parse_email, Attachment, EmailDocument, ParseError};
