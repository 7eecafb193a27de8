use crate::config::CrawlConfig;
use crate::crawlers::renderer::{PageRenderer, RenderSession, RenderedPage};
use crate::error::{CrawlError, RenderError};
use crate::parsers;
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// Renders pages in a real browser driven over the WebDriver protocol.
///
/// Each call to [`PageRenderer::open`] starts a new WebDriver session, so
/// concurrent crawls never share a browser.
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
    headless: bool,
    page_timeout: Duration,
}

impl WebDriverRenderer {
    pub fn new(config: &CrawlConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            page_timeout: config.page_timeout(),
        }
    }

    /// Session capabilities: DOMContentLoaded navigation, bounded page loads
    fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("pageLoadStrategy".to_string(), json!("eager"));
        caps.insert(
            "timeouts".to_string(),
            json!({ "pageLoad": self.page_timeout.as_millis() as u64 }),
        );

        if self.headless {
            let args = ["--headless=new", "--no-sandbox", "--disable-setuid-sandbox"];
            caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            caps.insert("moz:firefoxOptions".to_string(), json!({ "args": ["-headless"] }));
        }

        caps
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn open(&self) -> Result<Box<dyn RenderSession>, CrawlError> {
        let client = connect_to_webdriver(&self.webdriver_url, self.capabilities()).await?;
        Ok(Box::new(WebDriverSession {
            client: Some(client),
        }))
    }
}

/// Connects to the WebDriver instance
async fn connect_to_webdriver(
    webdriver_url: &str,
    capabilities: Map<String, Value>,
) -> Result<Client, CrawlError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities);

    match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            Ok(client)
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            ::log::error!(
                "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
            );
            Err(CrawlError::Engine(format!(
                "failed to start rendering session at {}: {}",
                webdriver_url, e
            )))
        }
    }
}

/// One WebDriver session; ended on `close` or, failing that, on drop
pub struct WebDriverSession {
    client: Option<Client>,
}

#[async_trait]
impl RenderSession for WebDriverSession {
    async fn load(&mut self, url: &Url, limit: Duration) -> Result<RenderedPage, RenderError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| RenderError::SessionLost("session already closed".to_string()))?;

        let started = Instant::now();
        let page = match timeout(limit, scrape_html_page(client, url)).await {
            Ok(result) => result?,
            Err(_) => {
                ::log::warn!("Timeout rendering: {}", url);
                return Err(RenderError::Timeout { after: limit });
            }
        };

        ::log::debug!(
            "Rendered {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(page)
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        match self.client.take() {
            Some(client) => {
                client
                    .close()
                    .await
                    .map_err(|e| CrawlError::Engine(format!("failed to close session: {}", e)))?;
                ::log::debug!("WebDriver session closed");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        let Some(client) = self.client.take() else {
            return;
        };

        ::log::debug!("WebDriver session dropped without close, ending it in the background");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = client.close().await {
                        ::log::warn!("Failed to end abandoned WebDriver session: {}", e);
                    }
                });
            }
            Err(_) => {
                ::log::warn!("No async runtime available to end abandoned WebDriver session");
            }
        }
    }
}

/// Navigates to `url` and reads back the rendered document
async fn scrape_html_page(client: &Client, url: &Url) -> Result<RenderedPage, RenderError> {
    client
        .goto(url.as_str())
        .await
        .map_err(|e| handle_navigation_error(e, "accessing", url))?;

    let html = client
        .source()
        .await
        .map_err(|e| handle_navigation_error(e, "getting source for", url))?;

    // Redirects change the base that relative links resolve against
    let base = client.current_url().await.unwrap_or_else(|_| url.clone());

    let links = parsers::extract_links(&html, &base);
    ::log::info!("Found {} links in {}", links.len(), url);

    Ok(RenderedPage { html, links })
}

/// Sorts a WebDriver command failure into page-level or session-level
fn handle_navigation_error(error: CmdError, context: &str, url: &Url) -> RenderError {
    let message = error.to_string();
    if is_session_gone(&error) {
        ::log::warn!("Lost session while {} {}: {}", context, url, message);
        RenderError::SessionLost(message)
    } else {
        ::log::warn!("Failed {} {}: {}", context, url, message);
        RenderError::Navigation(message)
    }
}

fn is_session_gone(error: &CmdError) -> bool {
    matches!(error, CmdError::Lost(_))
        || error.is_no_such_window()
        || error.is_invalid_session_id()
}
