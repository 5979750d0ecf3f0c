// studzo-backend - Gemini-backed AI advisory backend for international students

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use studzo_backend::analytics::UsageLog;
use studzo_backend::cli::Args;
use studzo_backend::config::AppConfig;
use studzo_backend::gateway::AdviceGateway;
use studzo_backend::gemini::GeminiClient;
use studzo_backend::server::create_router;
use studzo_backend::utils::logging;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting studzo-backend v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the Gemini client and the gateway around it
    let client = Arc::new(GeminiClient::new(&config.gemini)?);
    info!("Gemini client ready (model: {})", client.model());

    let usage = Arc::new(UsageLog::new());
    let gateway = Arc::new(AdviceGateway::new(&config, client, usage));

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), gateway)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

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
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
