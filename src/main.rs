use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use ragapi::{build_chain, create_router, telemetry, AppState};
use ragapi_core::AppConfig;
use ragapi_openai::OpenAiConfig;

const TITLE: &str = "RAG";
const DESCRIPTION: &str = "RAG system for Business";

#[derive(Parser)]
#[command(name = "ragapi")]
#[command(version, about = DESCRIPTION, long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "RAGAPI_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Address to bind
    #[arg(long, env = "RAGAPI_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "RAGAPI_PORT", default_value_t = 8000)]
    port: u16,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    tracing::info!("Starting {} ({}) v{}", TITLE, DESCRIPTION, env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_file(&cli.config)
        .inspect_err(|e| tracing::error!(error = %e, "configuration could not be loaded"))?;
    let openai = OpenAiConfig::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "language model settings missing"))?;
    tracing::info!(model = %openai.model, api_base = %openai.api_base, "language model configured");

    let chain = build_chain(&config, openai)?;
    let app = create_router(AppState::new(chain));

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
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
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
