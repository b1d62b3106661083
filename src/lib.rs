// src/lib.rs
// =============================================================================
// mailjson: find the JSON payload attached to or linked from an email.
//
// Modules, leaves first:
// - links: href extraction and URL resolution
// - fetch: reading targets from the network or the filesystem
// - email: MIME parsing into attachments and bodies
// - resolver: the depth-limited recursive JSON search
// - service: the full email -> JSON flow
// - server: axum routes and error responses
// - cli: command-line flags and environment configuration
// =============================================================================

pub mod cli;
pub mod email;
pub mod fetch;
pub mod links;
pub mod resolver;
pub mod server;
pub mod service;

mod test_utils;
