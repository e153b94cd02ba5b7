//! HTTP service for identity document scanning.
//!
//! Accepts a photographed document, runs it through OCR and the field
//! extraction engine, and verifies jurisdiction documents against the
//! member record store. Also relays face comparisons and push
//! notifications to their providers.

pub mod collaborators;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServiceError};
pub use routes::create_router;
pub use state::{AppState, RecordLookup};

use std::net::SocketAddr;

use idscan_core::IdScanConfig;

/// Start the service and run until the process stops.
pub async fn serve(config: &IdScanConfig) -> Result<(), ServerError> {
    let state = AppState::from_config(config)?;
    let app = create_router(state, config.server.body_limit_bytes);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
