//! Preview echo service.
//!
//! A small HTTP service that answers `GET` requests with the URL and headers
//! it received, serialized as JSON.
//!
//! ```text
//!     Client Request    ┌──────────────────────────────────────────────┐
//!     ──────────────────┼─▶ request id ─▶ trace ─▶ limits ─▶ timeout ─┐ │
//!                       │                                           │ │
//!     Client Response   │                                           ▼ │
//!     ◀─────────────────┼── JSON body ◀── echo handler ◀── metrics ─┘ │
//!                       │                                             │
//!                       │  preview store (built at startup, inert)    │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use preview_echo::config::load_or_default;
use preview_echo::lifecycle;
use preview_echo::observability::init_tracing;

#[derive(Parser)]
#[command(name = "preview-echo", version)]
#[command(about = "Echo request URL and headers back as JSON", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults are used when omitted.
    #[arg(short, long, env = "PREVIEW_ECHO_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    init_tracing(&config.observability);

    tracing::info!("preview-echo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        echo_path = %config.echo.path,
        max_concurrent_requests = config.listener.max_concurrent_requests,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
