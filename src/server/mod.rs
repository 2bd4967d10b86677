//! Thin HTTP layer over the conversion pipeline.
//!
//! Two routes: `GET /` serves the upload form, `POST /convert` runs the
//! batch and answers with a ZIP attachment or a redirect-with-message.
//! The request body cap is enforced here with [`DefaultBodyLimit`] so an
//! oversized upload dies with 413 before the pipeline ever runs. All
//! state is request-scoped; [`AppState`] only carries configuration.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;

/// Shared application state. Read-only after startup.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
}

/// Build the application [`Router`].
pub fn app(config: ServerConfig) -> Router {
    let max_body_bytes = config.max_body_bytes;
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(routes::index))
        .route("/convert", post(routes::convert))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `0.0.0.0:{port}` and serve until SIGINT/SIGTERM.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let router = app(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "jpeg2webp listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("jpeg2webp stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
