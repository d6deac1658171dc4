//! # HTTP Server
//!
//! Serves Prometheus metrics and liveness/readiness probes.

use crate::observability;
use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for health checks
#[derive(Debug)]
pub struct ServerState {
    /// Whether the controller is ready to serve (set once the server binds,
    /// cleared when the watch loop exits)
    pub is_ready: Arc<AtomicBool>,
}

/// Start the HTTP server for metrics and probes.
///
/// Marks the server state ready once the listener is bound, so the runtime
/// can gate startup on probe availability.
pub async fn start_server(port: u16, state: Arc<ServerState>) -> Result<()> {
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP server listening on port {}", port);
    state.is_ready.store(true, Ordering::Relaxed);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<ServerState>>) -> StatusCode {
    if state.is_ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics() -> (StatusCode, String) {
    match observability::metrics::gather() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            error!("failed to gather metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        }
    }
}
