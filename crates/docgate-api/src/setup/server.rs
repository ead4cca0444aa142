//! Listener binding and graceful shutdown

use anyhow::Result;
use axum::Router;
use docgate_core::Config;

/// Bind the listener and serve until a shutdown signal arrives.
///
/// Telemetry is flushed after the server drains, once in-flight spans have
/// ended.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(%addr, "Binding listener");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        supported_extensions = %config.supported_extensions().join(","),
        status_api_url = %config.status_api_url(),
        max_event_kb = config.max_event_size_bytes() / 1024,
        "Accepting ingestion events"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    crate::telemetry::shutdown_telemetry().await;

    Ok(())
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
///
/// # Panics
/// Panics if a signal handler cannot be installed; without one the process
/// could never be stopped cleanly.
async fn wait_for_shutdown() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl+C handler installation failed");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation failed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("Received Ctrl+C signal"),
        _ = terminate => tracing::info!("Received terminate signal"),
    }

    tracing::info!("Draining in-flight requests");
}
