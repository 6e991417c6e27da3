//! Breadth-first crawl frontier
//!
//! The frontier drives a [`LinkSource`] page by page over a FIFO queue until the
//! queue drains, enough PDFs are collected, or the page budget is spent. FIFO
//! order spreads discovery across sibling sections before any single branch is
//! drilled into.

use crate::crawler::classifier::LinkSource;
use crate::state::{CrawlLimits, CrawlState, LinkKind, LinkRecord};

/// Result of a completed traversal
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Collected PDF links in discovery order, truncated to `max_pdfs`
    pub pdfs: Vec<LinkRecord>,

    /// Number of PDF links discovered before truncation
    pub pdfs_discovered: usize,

    /// Number of pages fetched and classified
    pub pages_explored: usize,
}

/// Breadth-first traversal over repository pages
pub struct CrawlFrontier {
    state: CrawlState,
    limits: CrawlLimits,
}

impl CrawlFrontier {
    /// Creates a frontier seeded with a single URL
    pub fn new(seed_url: impl Into<String>, limits: CrawlLimits) -> Self {
        Self {
            state: CrawlState::new(seed_url),
            limits,
        }
    }

    /// Read-only view of the traversal state
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Returns true once a stop condition holds
    pub fn is_done(&self) -> bool {
        self.state.is_terminal(&self.limits)
    }

    /// Performs one transition: explore the next unvisited page
    ///
    /// Returns the explored URL, or `None` if there was nothing left to explore.
    pub async fn step<S: LinkSource + ?Sized>(&mut self, source: &S) -> Option<String> {
        let url = self.state.next_page()?;

        tracing::info!(
            "[{}/{}] Exploring page: {}",
            self.state.pages_explored(),
            self.limits.max_pages,
            url
        );

        let links = source.classify(&url).await;
        let mut new_pages = 0;
        for link in links {
            let kind = link.kind;
            if self.state.absorb(link) && kind == LinkKind::Page {
                new_pages += 1;
            }
        }

        tracing::debug!(
            "{} PDFs collected, {} new pages queued, {} pending",
            self.state.pdfs_collected(),
            new_pages,
            self.state.pending_len()
        );

        Some(url)
    }

    /// Runs the traversal to completion
    pub async fn run<S: LinkSource + ?Sized>(mut self, source: &S) -> CrawlOutcome {
        while !self.is_done() {
            if self.step(source).await.is_none() {
                break;
            }
        }

        let pdfs_discovered = self.state.pdfs_collected();
        let (pdfs, pages_explored) = self.state.finish(self.limits.max_pdfs);

        tracing::info!(
            "Crawl finished: {} PDFs kept ({} discovered) across {} pages",
            pdfs.len(),
            pdfs_discovered,
            pages_explored
        );

        CrawlOutcome {
            pdfs,
            pdfs_discovered,
            pages_explored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory page graph that records the order pages were requested in
    #[derive(Default)]
    struct PageGraph {
        pages: HashMap<String, Vec<LinkRecord>>,
        requested: Mutex<Vec<String>>,
    }

    impl PageGraph {
        fn page(mut self, url: &str, links: Vec<LinkRecord>) -> Self {
            self.pages.insert(url.to_string(), links);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LinkSource for PageGraph {
        async fn classify(&self, page_url: &str) -> Vec<LinkRecord> {
            self.requested.lock().unwrap().push(page_url.to_string());
            self.pages.get(page_url).cloned().unwrap_or_default()
        }
    }

    fn pdf(n: usize) -> LinkRecord {
        LinkRecord::pdf(format!("https://a.gov.co/docs/{}.pdf", n), "")
    }

    fn page(path: &str) -> LinkRecord {
        LinkRecord::page(format!("https://a.gov.co/repo/{}", path), "")
    }

    fn limits(max_pdfs: usize, max_pages: usize) -> CrawlLimits {
        CrawlLimits {
            max_pdfs,
            max_pages,
        }
    }

    const SEED: &str = "https://a.gov.co/repo/";

    #[tokio::test]
    async fn test_seed_with_pdfs_and_one_internal_page() {
        let graph = PageGraph::default()
            .page(SEED, vec![pdf(1), pdf(2), page("leyes")])
            .page("https://a.gov.co/repo/leyes", vec![pdf(3)]);

        let outcome = CrawlFrontier::new(SEED, limits(10, 5)).run(&graph).await;

        assert_eq!(outcome.pages_explored, 2);
        assert_eq!(
            graph.requested(),
            vec![SEED.to_string(), "https://a.gov.co/repo/leyes".to_string()]
        );
        let urls: Vec<_> = outcome.pdfs.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://a.gov.co/docs/1.pdf",
                "https://a.gov.co/docs/2.pdf",
                "https://a.gov.co/docs/3.pdf"
            ]
        );
    }

    #[tokio::test]
    async fn test_truncates_to_max_pdfs_in_discovery_order() {
        let graph = PageGraph::default()
            .page(SEED, vec![pdf(0), pdf(1), page("a")])
            .page(
                "https://a.gov.co/repo/a",
                (2..10).map(pdf).collect::<Vec<_>>(),
            );

        let outcome = CrawlFrontier::new(SEED, limits(3, 50)).run(&graph).await;

        assert_eq!(outcome.pdfs.len(), 3);
        assert_eq!(outcome.pdfs_discovered, 10);
        assert_eq!(outcome.pdfs[0].url, "https://a.gov.co/docs/0.pdf");
        assert_eq!(outcome.pdfs[2].url, "https://a.gov.co/docs/2.pdf");
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let graph = PageGraph::default()
            .page(SEED, vec![page("a"), page("b")])
            .page("https://a.gov.co/repo/a", vec![page("a1")])
            .page("https://a.gov.co/repo/b", vec![page("b1")]);

        CrawlFrontier::new(SEED, limits(10, 10)).run(&graph).await;

        assert_eq!(
            graph.requested(),
            vec![
                SEED.to_string(),
                "https://a.gov.co/repo/a".to_string(),
                "https://a.gov.co/repo/b".to_string(),
                "https://a.gov.co/repo/a1".to_string(),
                "https://a.gov.co/repo/b1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_page_limit_respected() {
        let graph = PageGraph::default()
            .page(SEED, vec![page("1"), page("2"), page("3"), page("4")]);

        let outcome = CrawlFrontier::new(SEED, limits(10, 2)).run(&graph).await;

        assert_eq!(outcome.pages_explored, 2);
        assert_eq!(graph.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_cycles_visit_each_page_once() {
        let graph = PageGraph::default()
            .page(SEED, vec![page("a"), page("b")])
            .page("https://a.gov.co/repo/a", vec![LinkRecord::page(SEED, ""), page("b")])
            .page("https://a.gov.co/repo/b", vec![page("a"), LinkRecord::page(SEED, "")]);

        let outcome = CrawlFrontier::new(SEED, limits(10, 100)).run(&graph).await;

        let requested = graph.requested();
        let mut unique = requested.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(requested.len(), unique.len());
        assert_eq!(outcome.pages_explored, 3);
    }

    #[tokio::test]
    async fn test_stops_when_pdf_limit_reached() {
        let graph = PageGraph::default()
            .page(SEED, vec![pdf(1), pdf(2), page("a")])
            .page("https://a.gov.co/repo/a", vec![pdf(3)]);

        let outcome = CrawlFrontier::new(SEED, limits(2, 10)).run(&graph).await;

        assert_eq!(outcome.pages_explored, 1);
        assert_eq!(outcome.pdfs.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_seed_yields_empty_outcome() {
        let graph = PageGraph::default();
        let outcome = CrawlFrontier::new(SEED, limits(10, 10)).run(&graph).await;

        assert_eq!(outcome.pages_explored, 1);
        assert!(outcome.pdfs.is_empty());
        assert_eq!(outcome.pdfs_discovered, 0);
    }

    #[tokio::test]
    async fn test_step_by_step() {
        let graph = PageGraph::default().page(SEED, vec![page("a")]);
        let mut frontier = CrawlFrontier::new(SEED, limits(10, 10));

        assert_eq!(frontier.step(&graph).await.as_deref(), Some(SEED));
        assert!(frontier.state().is_visited(SEED));
        assert_eq!(frontier.state().pending_len(), 1);
        assert_eq!(
            frontier.step(&graph).await.as_deref(),
            Some("https://a.gov.co/repo/a")
        );
        assert!(frontier.is_done());
        assert_eq!(frontier.step(&graph).await, None);
    }
}
