//! # pulse-server
//!
//! The Pulse HTTP API on axum.
//!
//! Public endpoints serve a business's feedback page and accept submissions
//! and analytics events. Everything under `/api/` except `page`, `analytics`,
//! `feedback` and `auth` needs a business bearer token. Errors are JSON
//! `{"error", "code"}` bodies, see [`ApiError`].

use std::sync::Arc;

use axum::Router;
use pulse_config::ServerConfig;
use pulse_db::FeedbackStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ServerError};
pub use extract::{ApiJson, ApiQuery};
pub use state::ServerState;

/// The full application with CORS and request tracing.
pub fn build_router<S: FeedbackStore + 'static>(
    state: Arc<ServerState<S>>,
    config: &ServerConfig,
) -> Router {
    let cors = if config.cors_allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };
    routes::routes::<S>()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.bind_address()` and serve until ctrl-c.
///
/// # Errors
///
/// [`ServerError::Bind`] if the address is unavailable, [`ServerError::Serve`]
/// if the listener fails.
pub async fn serve<S: FeedbackStore + 'static>(
    state: Arc<ServerState<S>>,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, backend = state.store().backend_kind(), "listening");

    axum::serve(listener, build_router(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
