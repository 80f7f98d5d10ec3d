//! HTTP listener lifecycle.

use crate::api::{ApiState, create_router};
use crate::config::ServiceConfig;
use beacon_error::{ServerError, ServerErrorKind};
use tracing::{info, instrument, warn};

/// Bind the listener and serve the presence API until shutdown.
///
/// Returns once the server stops serving (Ctrl-C); gateway session teardown
/// is the caller's job, so the session release brackets the server's whole
/// lifetime exactly once.
#[instrument(skip_all, fields(addr = %config.bind_addr))]
pub async fn serve(config: &ServiceConfig, state: ApiState) -> Result<(), ServerError> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(e.to_string())))?;

    info!("Presence API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
