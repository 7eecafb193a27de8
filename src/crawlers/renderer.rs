use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::error::{CrawlError, RenderError};

/// A page as it stood when the browser signalled "content loaded"
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Serialized DOM
    pub html: String,

    /// Targets of every anchor in the document, in document order
    pub links: Vec<String>,
}

/// Source of rendering sessions, shared across crawls
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Acquire a fresh rendering session (e.g. a browser context)
    async fn open(&self) -> Result<Box<dyn RenderSession>, CrawlError>;
}

/// A stateful browsing context owned by exactly one crawl.
///
/// Implementations must release their resources when dropped without
/// `close`, so that an aborted crawl does not leak a browser.
#[async_trait]
pub trait RenderSession: Send {
    /// Navigate to `url` and wait for the content-loaded signal
    async fn load(&mut self, url: &Url, timeout: Duration) -> Result<RenderedPage, RenderError>;

    /// Release everything held by the session
    async fn close(&mut self) -> Result<(), CrawlError>;
}
