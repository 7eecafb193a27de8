use crate::config::CrawlConfig;
use crate::crawlers::renderer::{PageRenderer, RenderSession, RenderedPage};
use crate::error::CrawlError;
use crate::filter;
use crate::frontier::Frontier;
use crate::results::{CrawlReport, PageResult};
use std::sync::Arc;
use std::time::Instant;
use url::{Origin, Url};

/// Lifecycle of a [`CrawlController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Running,
    Finished,
}

/// Drives one breadth-first, same-origin, budget-capped crawl.
///
/// A controller runs once. It owns its frontier, its result list and its
/// rendering session for the whole crawl; nothing is shared with other
/// crawls running at the same time.
pub struct CrawlController {
    renderer: Arc<dyn PageRenderer>,
    config: CrawlConfig,
    state: CrawlState,
}

impl CrawlController {
    pub fn new(renderer: Arc<dyn PageRenderer>, config: CrawlConfig) -> Self {
        Self {
            renderer,
            config,
            state: CrawlState::Idle,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Crawls outward from `seed`, returning every visited page in visitation order.
    ///
    /// Pages that fail to load are reported inline and do not stop the crawl.
    /// A malformed seed, a session that cannot be opened, or a session lost
    /// mid-crawl fail the whole call and discard any pages gathered so far.
    pub async fn run(&mut self, seed: &str) -> Result<Vec<PageResult>, CrawlError> {
        if self.state != CrawlState::Idle {
            return Err(CrawlError::AlreadyStarted);
        }
        self.state = CrawlState::Running;

        let outcome = self.crawl(seed).await;
        self.state = CrawlState::Finished;
        outcome
    }

    async fn crawl(&self, seed: &str) -> Result<Vec<PageResult>, CrawlError> {
        let (seed_url, origin) = filter::parse_seed(seed)?;
        ::log::info!(
            "Starting crawl of {} (budget {} pages)",
            seed_url,
            self.config.max_pages
        );
        let start_time = Instant::now();

        let mut session = self.renderer.open().await?;
        ::log::debug!("Rendering session opened for {}", seed_url);

        let mut frontier = Frontier::new();
        frontier.seed(seed_url);

        let outcome = self
            .visit_pages(session.as_mut(), &mut frontier, &origin)
            .await;

        if let Err(e) = session.close().await {
            ::log::warn!("Failed to close rendering session: {}", e);
        }

        match &outcome {
            Ok(results) => ::log::info!(
                "Crawl complete - visited {} pages ({} failed, {} left unvisited) in {:.2} seconds",
                results.len(),
                results.iter().filter(|r| !r.is_success()).count(),
                frontier.pending_count(),
                start_time.elapsed().as_secs_f64()
            ),
            Err(e) => ::log::error!("Crawl aborted: {}", e),
        }

        outcome
    }

    async fn visit_pages(
        &self,
        session: &mut dyn RenderSession,
        frontier: &mut Frontier,
        origin: &Origin,
    ) -> Result<Vec<PageResult>, CrawlError> {
        let page_timeout = self.config.page_timeout();
        let mut results = Vec::new();

        while !frontier.is_empty() && frontier.visited_count() < self.config.max_pages {
            let Some(url) = frontier.next() else {
                break;
            };
            if frontier.is_visited(&url) {
                ::log::trace!("Skipping already visited: {}", url);
                continue;
            }

            ::log::debug!("Visiting {}", url);
            match session.load(&url, page_timeout).await {
                Ok(page) => {
                    frontier.mark_visited(&url);
                    self.enqueue_links(&url, &page, frontier, origin);
                    results.push(PageResult::success(url.to_string(), page.html));
                }
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    ::log::warn!("Failed to load {}: {}", url, e);
                    frontier.mark_visited(&url);
                    results.push(PageResult::failure(url.to_string(), e.to_string()));
                }
            }
        }

        Ok(results)
    }

    /// Offers every same-origin link on `page` to the frontier
    fn enqueue_links(
        &self,
        url: &Url,
        page: &RenderedPage,
        frontier: &mut Frontier,
        origin: &Origin,
    ) {
        let limit = self.config.max_links_per_page.unwrap_or(usize::MAX);
        if page.links.len() > limit {
            ::log::debug!(
                "Considering only the first {} of {} links on {}",
                limit,
                page.links.len(),
                url
            );
        }

        for link in page.links.iter().take(limit) {
            let Some(candidate) = filter::scoped_url(link, origin) else {
                ::log::debug!("Origin policy rejected: {}", link);
                continue;
            };

            let queued = candidate.to_string();
            if frontier.offer(candidate) {
                ::log::info!("Queuing link for crawling: {}", queued);
            } else {
                ::log::debug!("Skipping already visited or queued link: {}", queued);
            }
        }
    }
}

/// Runs a single crawl from `seed` with a fresh controller
pub async fn crawl(
    renderer: Arc<dyn PageRenderer>,
    config: &CrawlConfig,
    seed: &str,
) -> Result<CrawlReport, CrawlError> {
    let mut controller = CrawlController::new(renderer, config.clone());
    let pages = controller.run(seed).await?;
    Ok(CrawlReport::new(pages))
}
