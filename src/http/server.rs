//! HTTP server setup and request entry point.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all relay handler
//! - Answer CORS preflight before credential resolution
//! - Serve the `GET /` availability probe without touching the upstream
//! - Wire up middleware (tracing, request ID, CORS guarantee)
//! - Bind server to listener with graceful shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::auth::CredentialResolver;
use crate::config::RelayConfig;
use crate::http::request::{MakeRelayRequestId, X_REQUEST_ID};
use crate::relay::{Relay, RelayBuildError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<CredentialResolver>,
    pub relay: Arc<Relay>,
    pub expose_upstream_errors: bool,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, RelayBuildError> {
        let relay = Arc::new(Relay::from_config(&config)?);
        let resolver = Arc::new(CredentialResolver::from_config(&config.credentials));

        let state = AppState {
            resolver,
            relay,
            expose_upstream_errors: config.relay.expose_upstream_errors,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(entry_handler))
            .route("/{*path}", any(entry_handler))
            .with_state(state)
            // Backstop: every response carries the CORS origin header, even
            // ones synthesized by middleware.
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRelayRequestId))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Single entry point for every inbound request.
///
/// Preflight and the availability probe short-circuit before credential
/// resolution; everything else goes through the relay pipeline.
async fn entry_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight_response();
    }
    if request.uri().path() == "/" && request.method() == Method::GET {
        return availability_response();
    }

    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (parts, body) = request.into_parts();

    let resolved = match state.resolver.resolve(&parts.headers, parts.uri.query()) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                path = %parts.uri.path(),
                error = %err,
                "Credential resolution failed"
            );
            return err.into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %parts.uri.path(),
        credential_source = ?resolved.source,
        "Relaying request"
    );

    match state.relay.forward(parts, body, resolved.credential()).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(request_id = %request_id, error = %err, "Relay failed");
            err.into_response_with(state.expose_upstream_errors)
        }
    }
}

/// CORS preflight response; never consults the resolver or the upstream.
fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Authorization, x-api-key, x-goog-api-key, Content-Type"),
    );
    response
}

/// Static availability probe; no upstream call.
fn availability_response() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Gemini API relay is running",
    )
        .into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
