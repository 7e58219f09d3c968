//! User Console server.
//!
//! Entry point: configuration, logging, then the Axum server.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use user_console::config::AppConfig;
use user_console::server;
use user_console::telemetry::{self, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    telemetry::init(LogFormat::from_env());

    let config = Arc::new(AppConfig::load()?);
    info!(
        name: "config.loaded",
        host = %config.server.host,
        port = config.server.port,
        api_base = %config.backend.api_base,
        "Configuration loaded"
    );

    server::start_server(config).await
}
