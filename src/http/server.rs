//! Listener setup and serve loop.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::SHUTDOWN_GRACE_SECS;
use crate::error::ServerError;

use super::shutdown;

/// Parse `host:port` and bind a listener.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let raw = format!("{}:{}", host, port);
    let addr: SocketAddr = raw
        .parse()
        .map_err(|e| ServerError::Address(raw.clone(), e))?;

    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `app` on `listener` until a shutdown signal arrives.
///
/// After the signal, open connections get `SHUTDOWN_GRACE_SECS` to finish
/// before the server returns regardless.
pub async fn start_server(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Starting HTTP server");

    let draining = Arc::new(Notify::new());
    let notify = draining.clone();

    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown::wait_for_signal().await;
            notify.notify_one();
        })
        .into_future();

    let grace = async {
        draining.notified().await;
        tracing::info!(
            "Graceful shutdown initiated, waiting up to {} seconds for connections to close",
            SHUTDOWN_GRACE_SECS
        );
        tokio::time::sleep(Duration::from_secs(SHUTDOWN_GRACE_SECS)).await;
    };

    tokio::select! {
        result = serve => {
            result?;
            tracing::info!("Server stopped");
        }
        _ = grace => {
            tracing::warn!("Connections still open after grace period, shutting down anyway");
        }
    }

    Ok(())
}
