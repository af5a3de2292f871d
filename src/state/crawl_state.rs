//! Per-run crawl state
//!
//! `CrawlState` is created when a run starts and dropped when it ends. It is
//! only ever touched by the coordinator's draining loop, so it needs no
//! locking.

use crate::state::CrawlPhase;
use serde::Serialize;
use std::collections::HashSet;
use url::Url;

/// An email address and the page it was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRecord {
    /// The address, as extracted
    #[serde(rename = "Email")]
    pub email: String,

    /// Final URL of the page (after redirects)
    #[serde(rename = "Page URL")]
    pub page_url: String,

    /// Page title, or `"N/A"` when the page has none
    #[serde(rename = "Page Title")]
    pub page_title: String,
}

/// State of one crawl run
#[derive(Debug)]
pub struct CrawlState {
    /// Canonical URLs that have been submitted for fetching
    visited: HashSet<String>,

    /// Addresses already present in `results`
    seen_emails: HashSet<String>,

    /// Collected records, in the order they were accepted
    results: Vec<EmailRecord>,

    /// Pages whose fetch has completed, successfully or not
    pages_scanned: usize,

    /// Maximum number of pages to scan
    page_budget: usize,

    /// Keep only the first record per address
    deduplicate: bool,

    phase: CrawlPhase,
}

impl CrawlState {
    /// Creates an empty state for a new run
    pub fn new(page_budget: usize, deduplicate: bool) -> Self {
        Self {
            visited: HashSet::new(),
            seen_emails: HashSet::new(),
            results: Vec::new(),
            pages_scanned: 0,
            page_budget,
            deduplicate,
            phase: CrawlPhase::Idle,
        }
    }

    /// Marks a canonical URL as visited
    ///
    /// Returns true if the URL was not visited before, i.e. the caller now
    /// owns submitting it.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Number of URLs marked visited
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns true once the visited set has grown to the page budget
    pub fn visited_full(&self) -> bool {
        self.visited.len() >= self.page_budget
    }

    /// Counts one completed page and returns the new total
    pub fn record_page(&mut self) -> usize {
        self.pages_scanned += 1;
        self.pages_scanned
    }

    /// Folds a page's email records into the results
    ///
    /// With deduplication enabled, a record whose address was already seen is
    /// dropped and the first occurrence wins. Without it every record is kept.
    ///
    /// # Returns
    ///
    /// The number of records added
    pub fn add_emails<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = EmailRecord>,
    {
        let before = self.results.len();

        for record in records {
            if self.deduplicate && !self.seen_emails.insert(record.email.clone()) {
                continue;
            }
            self.results.push(record);
        }

        self.results.len() - before
    }

    /// Returns true if there is budget left beyond the pages already
    /// scanned and the fetches still in flight
    pub fn has_room_for(&self, in_flight: usize) -> bool {
        self.pages_scanned + in_flight < self.page_budget
    }

    /// Returns true once `pages_scanned` has reached the page budget
    pub fn budget_reached(&self) -> bool {
        self.pages_scanned >= self.page_budget
    }

    /// Pages scanned so far
    pub fn pages_scanned(&self) -> usize {
        self.pages_scanned
    }

    /// The page budget of this run
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    /// Records collected so far
    pub fn results(&self) -> &[EmailRecord] {
        &self.results
    }

    /// Moves the run to `next`
    ///
    /// Illegal transitions are logged and ignored.
    pub fn transition(&mut self, next: CrawlPhase) -> bool {
        if !self.phase.can_transition_to(next) {
            tracing::warn!("Ignoring invalid phase transition: {} -> {}", self.phase, next);
            return false;
        }

        tracing::debug!("Crawl phase: {} -> {}", self.phase, next);
        self.phase = next;
        true
    }
}
