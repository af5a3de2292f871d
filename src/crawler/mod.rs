//! Crawler module for page fetching and frontier management
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and per-page email extraction
//! - HTML title, link and visible-text extraction
//! - The bounded worker pool that runs fetches concurrently
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{analyze_page, build_http_client, fetch_page, FetchError, PageData};
pub use parser::{extract_links, extract_title, visible_text, NO_TITLE};
pub use scheduler::{CompletedFetch, Scheduler};

use crate::config::Config;
use crate::output::{CrawlReport, LoggingObserver};
use crate::SiftError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client
/// 3. Fetch pages from the seed outward, staying on the seed's host
/// 4. Stop at the page budget or when no pages are left
///
/// Progress is reported through `tracing`.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(SiftError)` - Crawl could not be started
pub async fn crawl(config: Config) -> Result<CrawlReport, SiftError> {
    run_crawl(config, &mut LoggingObserver).await
}
