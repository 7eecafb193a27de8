//! HTTP service exposing the crawler.
//!
//! - `GET /healthz` and `GET /` are public
//! - `GET /scraper?url=<seed>` requires the shared `x-api-key` secret

mod auth;
mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::{CrawlConfig, ServerConfig};
use crate::crawlers::PageRenderer;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<Arc<str>>,
    pub crawl_config: Arc<CrawlConfig>,
    /// Opens one rendering session per crawl; sessions are never shared
    pub renderer: Arc<dyn PageRenderer>,
}

impl AppState {
    pub fn new(config: &ServerConfig, renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            api_key: config.api_key.as_deref().map(Arc::from),
            crawl_config: Arc::new(config.crawl.clone()),
            renderer,
        }
    }
}

/// Start the web server and run until Ctrl-C.
pub async fn serve(config: &ServerConfig, renderer: Arc<dyn PageRenderer>) -> anyhow::Result<()> {
    if config.api_key.is_none() {
        ::log::warn!("No API key configured; every /scraper request will be rejected");
    }

    let app = create_router(AppState::new(config, renderer));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    ::log::info!("Server started on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ::log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        ::log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    ::log::info!("Shutdown signal received");
}
