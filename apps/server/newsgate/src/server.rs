use crate::error::NewsgateError;
use crate::routes::router;
use crate::state::AppState;

use news_core::GatewayConfig;

use common::ErrorLocation;

use std::future::Future;
use std::panic::Location;

use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal;

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &GatewayConfig) -> Result<(), NewsgateError> {
    let state = AppState::from_config(config)?;

    info!("Binding to {}", config.bind_addr);
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| NewsgateError::Bind {
            message: format!("Failed to bind {}: {e}", config.bind_addr),
            location: ErrorLocation::from(Location::caller()),
        })?;

    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), NewsgateError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| NewsgateError::Serve {
            message: format!("Server error: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
