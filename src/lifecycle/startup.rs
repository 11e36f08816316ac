//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the preview store
//! - Bind the listener and serve until a termination signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::net::SocketAddr;

use chrono::Utc;
use tokio::net::TcpListener;

use crate::config::{EchoConfig, PreviewConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::init_metrics;
use crate::previews::PreviewStore;

/// Fatal errors raised before or while serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the preview store the server will own.
pub fn build_previews(config: &PreviewConfig) -> PreviewStore {
    let store = if config.prewarm {
        PreviewStore::prewarmed(Utc::now())
    } else {
        PreviewStore::new()
    };
    tracing::info!(records = store.len(), "Preview store ready");
    store
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: EchoConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        init_metrics(addr)?;
    }

    let previews = build_previews(&config.previews);

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(config, previews)
        .run(listener, server_shutdown)
        .await?;
    Ok(())
}
