//! Google Drive Gateway Server
//!
//! Entry point for the Drive folder → plain text HTTP service.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use gdrive_gateway::config::AppConfig;
use gdrive_gateway::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED)
    telemetry::init();

    let config = match AppConfig::load() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        name: "drive.config.loaded",
        folder_id = %config.drive.folder_id,
        api_base = %config.drive.api_base,
        "Drive configuration loaded"
    );

    server::start_server(config).await
}
