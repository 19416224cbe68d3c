// adlens - Multimodal creative analysis service for performance marketing

use adlens::cli::Args;
use adlens::config::AppConfig;
use adlens::gemini::GeminiClient;
use adlens::openai::OpenAiClient;
use adlens::server::create_router;
use adlens::utils::logging;
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting adlens v{}", env!("CARGO_PKG_VERSION"));

    // A missing key only fails requests to that provider, but it is
    // worth a startup warning.
    if config.openai.api_key.is_none() {
        warn!("OPENAI_API_KEY not set; /v1/analyze/openai will fail");
    }
    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; /v1/analyze/gemini will fail");
    }

    // Phase 3: Build provider clients
    let openai = OpenAiClient::new(&config.openai)?;
    let gemini = GeminiClient::new(&config.gemini)?;

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), openai, gemini)?;
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
