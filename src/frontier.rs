use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO work queue of URLs still to visit, with enqueued-or-visited tracking.
///
/// A URL enters the pending queue at most once over the lifetime of a
/// frontier, and is never re-queued after it has been visited.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<Url>,
    seen: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the frontier with its first pending URL
    pub fn seed(&mut self, url: Url) {
        debug_assert!(self.seen.is_empty(), "frontier seeded twice");
        self.offer(url);
    }

    /// Removes and returns the earliest-enqueued pending URL
    pub fn next(&mut self) -> Option<Url> {
        self.pending.pop_front()
    }

    /// Records that `url` has been visited
    pub fn mark_visited(&mut self, url: &Url) {
        if !self.visited.contains(url) {
            self.seen.insert(url.clone());
            self.visited.insert(url.clone());
        }
    }

    /// Queues `url` unless it has ever been enqueued or visited.
    ///
    /// Returns whether the URL was added.
    pub fn offer(&mut self, url: Url) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
