//! Scripted in-memory renderer for exercising the crawl controller and the
//! HTTP layer without a browser.

use crate::crawlers::renderer::{PageRenderer, RenderSession, RenderedPage};
use crate::error::{CrawlError, RenderError};
use crate::parsers;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// How a scripted URL behaves when loaded
#[derive(Debug, Clone)]
pub enum FakePage {
    /// Renders successfully with anchors pointing at these hrefs
    Links(Vec<String>),
    /// Never signals content loaded
    Timeout,
    /// Navigation fails with this message
    Broken(String),
    /// The browser dies while loading this page
    SessionLost,
    /// Loading never completes, even past the page timeout
    Hang,
}

#[derive(Debug, Default)]
pub struct FakeStats {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub dropped_unclosed: AtomicUsize,
    pub loads: Mutex<Vec<String>>,
}

impl FakeStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions released either explicitly or by drop
    pub fn released(&self) -> usize {
        self.closed.load(Ordering::SeqCst) + self.dropped_unclosed.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }
}

#[derive(Debug, Default, Clone)]
pub struct FakeSite {
    pages: Arc<HashMap<String, FakePage>>,
    fail_open: bool,
    pub stats: Arc<FakeStats>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page whose anchors point at `hrefs`
    pub fn page(self, url: &str, hrefs: &[&str]) -> Self {
        self.with(url, FakePage::Links(hrefs.iter().map(|h| h.to_string()).collect()))
    }

    pub fn with(mut self, url: &str, page: FakePage) -> Self {
        let key = Url::parse(url).unwrap().to_string();
        Arc::make_mut(&mut self.pages).insert(key, page);
        self
    }

    /// Makes every `open` fail as if the browser could not start
    pub fn failing_to_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn renderer(&self) -> Arc<dyn PageRenderer> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl PageRenderer for FakeSite {
    async fn open(&self) -> Result<Box<dyn RenderSession>, CrawlError> {
        if self.fail_open {
            return Err(CrawlError::Engine(
                "failed to start rendering session: browser not found".to_string(),
            ));
        }
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            site: self.clone(),
            closed: false,
        }))
    }
}

struct FakeSession {
    site: FakeSite,
    closed: bool,
}

#[async_trait]
impl RenderSession for FakeSession {
    async fn load(&mut self, url: &Url, timeout: Duration) -> Result<RenderedPage, RenderError> {
        self.site.stats.loads.lock().unwrap().push(url.to_string());

        match self.site.pages.get(url.as_str()) {
            Some(FakePage::Links(hrefs)) => {
                let anchors: String = hrefs
                    .iter()
                    .map(|href| format!(r#"<a href="{}">link</a>"#, href))
                    .collect();
                let html = format!("<html><head></head><body>{}</body></html>", anchors);
                let links = parsers::extract_links(&html, url);
                Ok(RenderedPage { html, links })
            }
            Some(FakePage::Timeout) => Err(RenderError::Timeout { after: timeout }),
            Some(FakePage::Broken(message)) => Err(RenderError::Navigation(message.clone())),
            Some(FakePage::SessionLost) => {
                Err(RenderError::SessionLost("invalid session id".to_string()))
            }
            Some(FakePage::Hang) => std::future::pending().await,
            None => Err(RenderError::Navigation(format!(
                "net::ERR_CONNECTION_REFUSED at {}",
                url
            ))),
        }
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        if !self.closed {
            self.closed = true;
            self.site.stats.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        if !self.closed {
            self.site.stats.dropped_unclosed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
