mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{HttpNumberSource, MemoryWindowStore};
use application::AverageService;
use config::Config;
use interface::http::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("numwin={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting numwin v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    if config.access_token.is_none() {
        warn!("⚠ NUMWIN_ACCESS_TOKEN is not set, upstream requests will be unauthenticated");
    }

    // Initialize adapters
    let source = Arc::new(HttpNumberSource::new(config.upstream())?);
    let store = Arc::new(MemoryWindowStore::new(config.window_capacity()?));

    let average_service = Arc::new(AverageService::new(source, store, config.fetch_timeout()));

    info!("✓ Average service initialized (window size {})", config.window_size);

    // Create HTTP server
    let app = create_router(average_service);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✓ numwin listening on {}", addr);
    info!("  → API: http://localhost:{}/numbers/{{p|f|e|r}}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
