// src/server/routes.rs
// =============================================================================
// Router and handlers.
//
// The service is shared between requests through an Arc. It holds no mutable
// state, so requests never wait on each other.
// =============================================================================

use super::error::ApiError;
use super::openapi::openapi_document;
use crate::fetch::Fetch;
use crate::service::{EmailJsonService, ExtractError};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
pub struct ParseEmailQuery {
    path: Option<String>,
}

pub fn router<E, L>(service: Arc<EmailJsonService<E, L>>) -> Router
where
    E: Fetch + 'static,
    L: Fetch + 'static,
{
    Router::new()
        .route("/mail/parse-email", get(parse_email::<E, L>))
        .route("/api-docs/openapi.json", get(api_docs))
        .with_state(service)
}

// Binds the address and serves until Ctrl-C
pub async fn serve<E, L>(addr: SocketAddr, service: EmailJsonService<E, L>) -> std::io::Result<()>
where
    E: Fetch + 'static,
    L: Fetch + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[instrument(skip_all)]
async fn parse_email<E: Fetch, L: Fetch>(
    State(service): State<Arc<EmailJsonService<E, L>>>,
    query: Option<Query<ParseEmailQuery>>,
) -> Result<Json<Value>, ApiError> {
    // A query string that doesn't deserialize (e.g. a repeated `path`) is
    // reported like a missing path, with the usual JSON error body
    let path = query
        .and_then(|Query(query)| query.path)
        .ok_or(ExtractError::MissingPath)?;
    let value = service.extract(&path).await?;
    Ok(Json(value))
}

async fn api_docs() -> Json<Value> {
    Json(openapi_document())
}
