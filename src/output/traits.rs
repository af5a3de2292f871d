//! Observer trait and event payloads
//!
//! The coordinator calls a `CrawlObserver` synchronously from its control
//! loop at fixed checkpoints. Observers never see partially updated state.

use crate::state::{CrawlOutcome, EmailRecord};
use std::time::Duration;

/// Snapshot of a running crawl
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Pages whose fetch has completed
    pub pages_scanned: usize,

    /// Records collected so far
    pub emails_found: usize,

    /// Time since the crawl started
    pub elapsed: Duration,

    /// The page that completed most recently
    pub current_url: String,

    /// The run's page budget
    pub page_budget: usize,
}

impl Progress {
    /// Fraction of the page budget spent, in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.page_budget == 0 {
            return 1.0;
        }
        (self.pages_scanned as f64 / self.page_budget as f64).min(1.0)
    }
}

/// Final result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Collected records, in the order they were found
    pub results: Vec<EmailRecord>,

    /// Pages whose fetch completed
    pub pages_scanned: usize,

    /// Canonical URLs submitted for fetching
    pub urls_visited: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Why the run stopped
    pub outcome: CrawlOutcome,
}

impl CrawlReport {
    /// Returns true if no emails were found
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Receives events from a running crawl
///
/// All methods default to doing nothing, so implementors only override what
/// they render.
pub trait CrawlObserver {
    /// Called every few pages, when the budget is hit, and once at the end
    fn on_progress(&mut self, _progress: &Progress) {}

    /// Called alongside every progress event with the current results
    fn on_results_updated(&mut self, _results: &[EmailRecord]) {}

    /// Called once when the run has stopped
    fn on_complete(&mut self, _report: &CrawlReport) {}
}

/// Observer that ignores every event
impl CrawlObserver for () {}

/// Observer that reports progress through `tracing`
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl CrawlObserver for LoggingObserver {
    fn on_progress(&mut self, progress: &Progress) {
        tracing::info!(
            "Progress: {}/{} pages ({:.0}%), {} emails, {:.1}s elapsed, last: {}",
            progress.pages_scanned,
            progress.page_budget,
            progress.fraction() * 100.0,
            progress.emails_found,
            progress.elapsed.as_secs_f64(),
            progress.current_url
        );
    }

    fn on_results_updated(&mut self, results: &[EmailRecord]) {
        if let Some(latest) = results.last() {
            tracing::debug!("Latest email: {} ({})", latest.email, latest.page_url);
        }
    }

    fn on_complete(&mut self, report: &CrawlReport) {
        tracing::info!(
            "Crawl finished ({}): {} pages scanned in {:.2}s, {} emails found",
            report.outcome,
            report.pages_scanned,
            report.duration.as_secs_f64(),
            report.results.len()
        );
    }
}
