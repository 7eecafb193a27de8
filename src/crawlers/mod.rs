pub mod crawler;
pub mod renderer;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use crawler::{CrawlController, CrawlState, crawl};
pub use renderer::{PageRenderer, RenderSession, RenderedPage};
pub use web::WebDriverRenderer;
