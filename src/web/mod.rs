//! HTTP boundary
//!
//! Exposes the orchestrator as `GET /ping`, `/search`, `/lyrics` and
//! `/translate`, returning JSON bodies.

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::core::LyricsOrchestrator;
use crate::error::{BridgeError, Result};
use crate::signal_handler::shutdown_signal;

pub async fn serve(bind_addr: &str, port: u16, orchestrator: Arc<LyricsOrchestrator>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", bind_addr, port)
        .parse()
        .map_err(|e| BridgeError::Validation(format!("Invalid bind address {}:{}: {}", bind_addr, port, e)))?;

    let app = create_router(Arc::new(AppState { orchestrator }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BridgeError::Internal(anyhow::anyhow!("Failed to bind {}: {}", addr, e)))?;
    info!("Listening on http://{}", addr);
    info!("Endpoints: GET /ping, /search, /lyrics, /translate");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BridgeError::Internal(e.into()))?;

    info!("Server stopped");
    Ok(())
}
