//! HTTP server for the gateway
//!
//! Routes:
//! - `/api/` and `/api/{endpoint}`: the five generation endpoints (POST),
//!   CORS preflight (OPTIONS), 404 for unknown endpoints, 405 for any other
//!   method
//! - `/health`: liveness probe
//! - everything else: the static client bundle with index fallback (GET,
//!   HEAD); POST answers 404 and OPTIONS the preflight
//!
//! Each connection is served on its own tokio task; state is immutable and
//! shared through an `Arc`.

mod assets;

pub use assets::static_assets;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{MethodRouter, any, get, get_service},
};
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::api::{ApiError, dispatch};
use crate::config::Config;
use crate::error::{Result, SlidegateError};
use crate::provider::{ContentGenerator, GeminiClient};
use crate::requests::Endpoint;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Provider used by every API call
    pub generator: Arc<dyn ContentGenerator>,
    /// Directory served for non-API paths
    pub static_dir: PathBuf,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(generator: Arc<dyn ContentGenerator>, config: &Config) -> Self {
        Self {
            generator,
            static_dir: config.server.static_dir.clone(),
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}

/// The gateway server
pub struct GatewayServer {
    config: Config,
}

impl GatewayServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    pub async fn serve(&self) -> Result<()> {
        let client = GeminiClient::new(self.config.provider.clone())
            .map_err(|e| SlidegateError::Config(e.to_string()))?;

        if !client.has_api_key() {
            tracing::warn!(
                "{} is not set; AI endpoints will fail until it is",
                self.config.provider.api_key_env
            );
        }

        let state = Arc::new(AppState::new(Arc::new(client), &self.config));
        let app = create_router(state);

        let addr = self.config.server.socket_addr()?;

        tracing::info!(
            "Provider: {}/{}",
            self.config.provider.base_url,
            self.config.provider.api_version
        );
        tracing::info!(
            "Serving static assets from {}",
            self.config.server.static_dir.display()
        );

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| SlidegateError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!("Listening on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| SlidegateError::Server(format!("Server error: {e}")))?;

        tracing::info!("Gateway shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let assets: MethodRouter =
        get_service(static_assets(&state.static_dir)).fallback(static_method_fallback);
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .route("/health", get(health_handler))
        // The wildcard does not match an empty tail
        .route("/api/", any(api_handler).layer(body_limit.clone()))
        .route("/api/{*endpoint}", any(api_handler).layer(body_limit))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint - returns JSON status
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Entry point for every `/api/` request
///
/// Method is checked before the path: OPTIONS always answers the preflight,
/// non-POST methods get 405 even on unknown paths.
async fn api_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return preflight_response();
    }

    let path = uri.path();
    let started = Instant::now();

    let result = match (method, Endpoint::from_path(path)) {
        (Method::POST, Some(endpoint)) => match body {
            Ok(body) => dispatch(state.generator.as_ref(), endpoint, &body).await,
            Err(rejection) => Err(ApiError::from(rejection)),
        },
        (Method::POST, None) => Err(ApiError::NotFound),
        _ => Err(ApiError::MethodNotAllowed),
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(response) => {
            tracing::info!(path, elapsed_ms, "Request completed");
            response.into_response()
        }
        Err(error) => {
            let status = error.status().as_u16();
            if status >= 500 {
                tracing::error!(
                    path,
                    status,
                    elapsed_ms,
                    error_type = error.category(),
                    error_message = %error,
                    "Request failed"
                );
            } else {
                tracing::warn!(
                    path,
                    status,
                    error_type = error.category(),
                    error_message = %error,
                    "Request rejected"
                );
            }
            error.into_response()
        }
    }
}

/// Non-GET methods on static paths
async fn static_method_fallback(method: Method, uri: Uri) -> Response {
    let error = match method {
        Method::OPTIONS => return preflight_response(),
        Method::POST => ApiError::NotFound,
        _ => ApiError::MethodNotAllowed,
    };
    tracing::warn!(
        path = uri.path(),
        status = error.status().as_u16(),
        error_type = error.category(),
        "Request rejected"
    );
    error.into_response()
}

fn preflight_response() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
