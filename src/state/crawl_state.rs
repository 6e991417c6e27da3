use crate::state::{LinkKind, LinkRecord};
use std::collections::{HashSet, VecDeque};

/// Limits bounding one breadth-first traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Maximum number of PDF links kept
    pub max_pdfs: usize,

    /// Maximum number of pages explored
    pub max_pages: usize,
}

impl Default for CrawlLimits {
    fn default() -> Self {
        Self {
            max_pdfs: 200,
            max_pages: 100,
        }
    }
}

/// Traversal state for one crawl run
///
/// Owned by a single frontier for the lifetime of a run. A URL enters `visited`
/// at most once, and a URL is only ever queued if it is neither visited nor
/// already pending.
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    pending: VecDeque<String>,
    queued: HashSet<String>,
    collected_pdfs: Vec<LinkRecord>,
    pages_explored: usize,
}

impl CrawlState {
    /// Creates the initial state: only the seed is pending
    pub fn new(seed_url: impl Into<String>) -> Self {
        let seed = seed_url.into();
        let mut queued = HashSet::new();
        queued.insert(seed.clone());

        Self {
            visited: HashSet::new(),
            pending: VecDeque::from([seed]),
            queued,
            collected_pdfs: Vec::new(),
            pages_explored: 0,
        }
    }

    /// Returns true if the traversal must stop
    pub fn is_terminal(&self, limits: &CrawlLimits) -> bool {
        self.pending.is_empty()
            || self.collected_pdfs.len() >= limits.max_pdfs
            || self.pages_explored >= limits.max_pages
    }

    /// Pops the next page to explore and marks it visited
    ///
    /// Already-visited entries are skipped. Returns `None` once the queue is
    /// exhausted.
    pub fn next_page(&mut self) -> Option<String> {
        while let Some(url) = self.pending.pop_front() {
            self.queued.remove(&url);
            if self.visited.insert(url.clone()) {
                self.pages_explored += 1;
                return Some(url);
            }
        }
        None
    }

    /// Triages one classified link into the PDF collection or the queue
    ///
    /// Returns true if the link changed the state.
    pub fn absorb(&mut self, link: LinkRecord) -> bool {
        match link.kind {
            LinkKind::Pdf => {
                self.collected_pdfs.push(link);
                true
            }
            LinkKind::Page => {
                if self.visited.contains(&link.url) || self.queued.contains(&link.url) {
                    return false;
                }
                self.queued.insert(link.url.clone());
                self.pending.push_back(link.url);
                true
            }
        }
    }

    /// Consumes the state, truncating the PDF collection to `max_pdfs`
    pub fn finish(self, max_pdfs: usize) -> (Vec<LinkRecord>, usize) {
        let mut pdfs = self.collected_pdfs;
        pdfs.truncate(max_pdfs);
        (pdfs, self.pages_explored)
    }

    pub fn pages_explored(&self) -> usize {
        self.pages_explored
    }

    pub fn pdfs_collected(&self) -> usize {
        self.collected_pdfs.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }
}
