use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a single crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of pages visited per crawl
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Per-page load timeout in seconds
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Cap on links considered per page (unbounded if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_links_per_page: Option<usize>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            page_timeout_secs: default_page_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            max_links_per_page: None,
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings under which no page could ever be crawled
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("max_pages must be at least 1".to_string());
        }
        if self.page_timeout_secs == 0 {
            return Err("page_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

/// Process-wide service configuration, read once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP service listens on
    pub port: u16,

    /// Shared secret expected in `x-api-key`; `None` rejects every scraper request
    pub api_key: Option<String>,

    /// Settings applied to every crawl the service runs
    pub crawl: CrawlConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            api_key: None,
            crawl: CrawlConfig::default(),
        }
    }
}

fn default_max_pages() -> usize {
    20
}

fn default_page_timeout_secs() -> u64 {
    20
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_port() -> u16 {
    3000
}
