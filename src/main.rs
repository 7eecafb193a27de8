use clap::Parser;
use site_render::crawlers::{self, PageRenderer, WebDriverRenderer};
use site_render::server;
use std::sync::Arc;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up PORT, API_KEY and friends from a local .env if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    match &args.command {
        Some(Command::Crawl { url }) => {
            let config = args.crawl_config()?;
            let renderer: Arc<dyn PageRenderer> = Arc::new(WebDriverRenderer::new(&config));

            let report = crawlers::crawl(renderer, &config, url).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(Command::Serve) | None => {
            let config = args.server_config()?;
            run_server(config).await?;
        }
    }

    Ok(())
}

async fn run_server(config: site_render::config::ServerConfig) -> anyhow::Result<()> {
    ::log::info!(
        "Rendering with WebDriver at {} ({} pages per crawl, {}s page timeout)",
        config.crawl.webdriver_url,
        config.crawl.max_pages,
        config.crawl.page_timeout_secs
    );
    let renderer: Arc<dyn PageRenderer> = Arc::new(WebDriverRenderer::new(&config.crawl));
    server::serve(&config, renderer).await
}
