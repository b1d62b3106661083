// src/server/mod.rs
// =============================================================================
// The HTTP surface, built with axum.
//
// Routes:
// - GET /mail/parse-email?path=<path or URL>  -> the JSON found in the email
// - GET /api-docs/openapi.json                -> OpenAPI description
// =============================================================================

mod error;
mod openapi;
mod routes;

pub use error::ApiError;
pub use openapi::openapi_document;
pub use routes::{router, serve};
