//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, limits, timeout, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Span;

use crate::config::{EchoConfig, EchoSettings};
use crate::http::echo::echo_handler;
use crate::http::health::health_handler;
use crate::http::request::{request_id_middleware, RequestIdExt};
use crate::observability::metrics::track_metrics;
use crate::previews::PreviewStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub echo: Arc<EchoSettings>,
    /// Owned by the server; not consulted by any handler.
    pub previews: Arc<PreviewStore>,
}

/// HTTP server for the echo service.
pub struct HttpServer {
    router: Router,
    config: EchoConfig,
    previews: Arc<PreviewStore>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and preview store.
    pub fn new(config: EchoConfig, previews: PreviewStore) -> Self {
        let previews = Arc::new(previews);
        let state = AppState {
            echo: Arc::new(config.echo.clone()),
            previews: previews.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            previews,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EchoConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.echo.path, get(echo_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_concurrent_requests,
            ))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// The fully layered router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            echo_path = %self.config.echo.path,
            previews = self.previews.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .request_id()
        .map(|id| id.to_string())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
