//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `LinkRecord` / `LinkKind`: a classified anchor found on a page
//! - `CrawlState`: visited set, FIFO pending queue and collected PDFs of one run
//! - `CrawlLimits`: the PDF and page bounds the traversal respects

mod crawl_state;
mod link;

// Re-export main types
pub use crawl_state::{CrawlLimits, CrawlState};
pub use link::{LinkKind, LinkRecord};
