//! Bounded, same-origin crawler that renders every page in a real browser.
//!
//! [`crawlers::CrawlController`] walks a site breadth-first from a seed URL,
//! following only links that share the seed's origin, until the frontier
//! runs dry or the page budget is spent. Pages are loaded through the
//! [`crawlers::PageRenderer`] capability; [`crawlers::WebDriverRenderer`]
//! implements it over WebDriver. The [`server`] module exposes crawls over
//! HTTP behind a shared API key.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod frontier;
pub mod parsers;
pub mod results;
pub mod server;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{CrawlError, RenderError};
pub use results::{CrawlReport, PageResult};
