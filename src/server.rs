//! HTTP server lifecycle: bind, announce, serve until shutdown.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::utils::shutdown_signal;

/// Bind the HTTP listener for the configured port.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = config.socket_addr()?;
    TcpListener::bind(addr).await.map_err(|source| {
        error!("Failed to bind {}: {}", addr, source);
        ApiError::Bind { addr, source }
    })
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ApiError::Serve)
}

/// Bind, log the startup banner and serve until Ctrl-C / SIGTERM.
pub async fn serve(config: &Config) -> Result<()> {
    let listener = bind(config).await?;
    let port = &config.port;

    info!("🚀 Starting Flavor Town API server on port {}", port);
    info!("📚 Swagger docs available at: http://localhost:{}/docs/index.html", port);
    info!("🔗 Test endpoint: http://localhost:{}/api/v1/test", port);

    run(listener, AppState::from_config(config), shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}
