use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bobaedream_best::config::Config;
use bobaedream_best::web;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting bobaedream-best");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        board_url = %config.board_url,
        timeout_secs = config.fetch_timeout.as_secs(),
        "Configuration loaded"
    );

    web::serve(config, shutdown_signal()).await?;

    info!("Shutdown complete");

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "info,bobaedream_best=debug,tower_http=debug";

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let use_json = std::env::var("LOG_FORMAT").is_ok_and(|v| json_logging_requested(&v));

    // Exactly one of the two fmt layers is active
    tracing_subscriber::registry()
        .with(filter)
        .with(use_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!use_json).then(tracing_subscriber::fmt::layer))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

fn json_logging_requested(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "json" | "structured"
    )
}

/// Resolve on SIGINT or SIGTERM.
///
/// A handler that fails to install is logged and never fires, so the other
/// signal still stops the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    info!(signal, "Shutdown signal received, draining in-flight requests");
}
