use clap::{Parser, Subcommand};
use site_render::config::{CrawlConfig, ServerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-render")]
#[command(about = "Same-origin crawler that returns the rendered HTML of every page it visits")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Port the HTTP service listens on
    #[arg(short, long, env = "PORT", default_value_t = 3000, global = true)]
    pub port: u16,

    /// Shared secret expected in the x-api-key header
    #[arg(long, env = "API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// JSON file with crawl settings; flags and environment override it
    #[arg(long, env = "CRAWL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// URL for the WebDriver instance
    #[arg(long, env = "WEBDRIVER_URL", global = true)]
    pub webdriver_url: Option<String>,

    /// Maximum number of pages visited per crawl
    #[arg(long, env = "MAX_PAGES", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: Option<u64>,

    /// Per-page load timeout in seconds
    #[arg(long, env = "PAGE_TIMEOUT_SECS", global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_timeout: Option<u64>,

    /// Show the browser window instead of running headless
    #[arg(long, global = true)]
    pub headed: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Crawl a single site and print the result as JSON
    Crawl {
        /// Seed URL to crawl from
        url: String,
    },
}

impl Args {
    /// Crawl settings from the optional config file, with flags applied on top
    pub fn crawl_config(&self) -> anyhow::Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path).map_err(|e| {
                anyhow::anyhow!("failed to load crawl config {}: {}", path.display(), e)
            })?,
            None => CrawlConfig::default(),
        };

        if let Some(webdriver_url) = self.webdriver_url.as_ref().filter(|u| !u.is_empty()) {
            config.webdriver_url = webdriver_url.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages as usize;
        }
        if let Some(page_timeout) = self.page_timeout {
            config.page_timeout_secs = page_timeout;
        }
        if self.headed {
            config.headless = false;
        }

        Ok(config)
    }

    /// Server settings; an empty API key counts as none
    pub fn server_config(&self) -> anyhow::Result<ServerConfig> {
        Ok(ServerConfig {
            port: self.port,
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            crawl: self.crawl_config()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_crawl_defaults() {
        let args = Args::try_parse_from([
            "site-render",
            "--max-pages",
            "5",
            "--page-timeout",
            "3",
            "--webdriver-url",
            "http://chromedriver:9515",
            "--headed",
            "crawl",
            "http://a.test/",
        ])
        .unwrap();

        let config = args.crawl_config().unwrap();
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.page_timeout_secs, 3);
        assert_eq!(config.webdriver_url, "http://chromedriver:9515");
        assert!(!config.headless);
        assert!(matches!(args.command, Some(Command::Crawl { ref url }) if url == "http://a.test/"));
    }

    #[test]
    fn test_zero_page_budget_is_rejected() {
        assert!(Args::try_parse_from(["site-render", "--max-pages", "0"]).is_err());
    }

    #[test]
    fn test_empty_api_key_counts_as_unset() {
        let args =
            Args::try_parse_from(["site-render", "--api-key", "", "--port", "8080", "serve"])
                .unwrap();
        let config = args.server_config().unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.api_key.is_none());
    }
}
