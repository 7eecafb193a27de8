use std::time::Duration;
use thiserror::Error;

/// Failure to render a single page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The page did not signal "content loaded" within the allotted time
    #[error("Navigation timeout of {} ms exceeded", .after.as_millis())]
    Timeout { after: Duration },

    /// The browser could not navigate to the page or read it back
    #[error("{0}")]
    Navigation(String),

    /// The rendering session itself is gone; no further page can be loaded
    #[error("rendering session lost: {0}")]
    SessionLost(String),
}

impl RenderError {
    /// Whether this error ends the whole crawl rather than just the current page
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::SessionLost(_))
    }
}

/// Request-level crawl failures.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("{0}")]
    Engine(String),

    #[error("crawl controller has already been run")]
    AlreadyStarted,
}

impl From<RenderError> for CrawlError {
    fn from(err: RenderError) -> Self {
        CrawlError::Engine(err.to_string())
    }
}
