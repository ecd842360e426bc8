mod routes;
pub mod templates;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::best::BestPostCollector;
use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub collector: BestPostCollector,
}

impl AppState {
    /// Build the state for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collector cannot be built.
    pub fn from_config(config: Config) -> Result<Self> {
        let collector =
            BestPostCollector::from_config(&config).context("Failed to build best post collector")?;
        Ok(Self {
            config: Arc::new(config),
            collector,
        })
    }
}

/// Start the web server and run until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after `shutdown` fires.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn serve<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.web_host, config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let state = AppState::from_config(config)?;
    let app = create_app(state);

    info!(addr = %addr, "Starting HTTP web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server error")?;

    info!("HTTP web server stopped");
    Ok(())
}

/// Create the main application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_returns_when_shutdown_resolves() {
        let config = Config {
            web_port: 0,
            ..Config::for_testing()
        };

        serve(config, async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_address() {
        let config = Config {
            web_host: "not a host".to_string(),
            ..Config::for_testing()
        };

        let err = serve(config, async {}).await.unwrap_err();
        assert!(format!("{err:#}").contains("Invalid web server address"));
    }
}
