//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the control loop of a crawl run:
//! - Seeding the frontier
//! - Draining completed fetches from the scheduler
//! - Folding emails into the run's `CrawlState`
//! - Filtering discovered links and resubmitting same-domain ones
//! - Emitting progress and completion events
//!
//! All crawl state is mutated here and only here, one completion at a time.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, PageData};
use crate::crawler::scheduler::{CompletedFetch, Scheduler};
use crate::extract::EmailExtractor;
use crate::output::{CrawlObserver, CrawlReport, Progress};
use crate::state::{CrawlOutcome, CrawlPhase, CrawlState};
use crate::url::{canonicalize, is_same_domain, netloc, parse_seed_url};
use crate::SiftError;
use reqwest::Client;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Main crawler coordinator structure
///
/// A coordinator runs exactly one crawl; `run` consumes it.
pub struct Coordinator {
    seed: Url,
    seed_netloc: String,
    state: CrawlState,
    scheduler: Scheduler,
    progress_interval: usize,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Validates the configuration and builds the shared HTTP client. An
    /// empty or unparseable seed URL is rejected here, before any work starts.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SiftError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: Config) -> Result<Self, SiftError> {
        validate(&config)?;
        let client = build_http_client(&config.http)?;
        Self::assemble(config, client)
    }

    /// Creates a coordinator that fetches through an existing client
    pub fn with_client(config: Config, client: Client) -> Result<Self, SiftError> {
        validate(&config)?;
        Self::assemble(config, client)
    }

    fn assemble(config: Config, client: Client) -> Result<Self, SiftError> {
        let seed = parse_seed_url(&config.crawler.start_url)?;
        let seed_netloc = netloc(&seed);

        let scheduler = Scheduler::new(
            client,
            Arc::new(EmailExtractor::default()),
            config.crawler.worker_count,
            config.crawler.timeout(),
        );

        Ok(Self {
            seed,
            seed_netloc,
            state: CrawlState::new(
                config.crawler.max_pages,
                config.crawler.deduplicate_emails,
            ),
            scheduler,
            progress_interval: config.output.progress_interval,
        })
    }

    /// The seed URL of this run
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Runs the crawl to completion
    ///
    /// # Crawl Loop
    ///
    /// 1. Mark the seed visited and submit it
    /// 2. Wait for the first fetch to complete, then drain all completed ones
    /// 3. For each completion:
    ///    a. Count the page as scanned (failures included)
    ///    b. Fold its emails into the results
    ///    c. If scanned + in-flight is still under the budget, submit every
    ///       unvisited same-domain link, marking it visited on submission
    ///    d. Stop as soon as the budget is reached
    /// 4. Repeat until the budget is reached or nothing is in flight
    /// 5. Cancel outstanding fetches, emit a final progress event and
    ///    report completion
    pub async fn run(mut self, observer: &mut dyn CrawlObserver) -> CrawlReport {
        let started = Instant::now();
        tracing::info!(
            "Starting crawl of {} (budget {} pages)",
            self.seed,
            self.state.page_budget()
        );

        self.state.transition(CrawlPhase::Running);
        self.state.mark_visited(&canonicalize(&self.seed));
        self.scheduler.submit(self.seed.clone());

        let mut current_url = self.seed.to_string();

        'crawl: while !self.scheduler.is_idle() {
            let completed = self.scheduler.wait_for_completions().await;
            let mut unprocessed = completed.len();

            for CompletedFetch { url, result } in completed {
                unprocessed -= 1;
                let page = match result {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::debug!("No data from {}: {}", url, e);
                        PageData::default()
                    }
                };

                let scanned = self.state.record_page();
                let added = self.state.add_emails(page.emails);
                if added > 0 {
                    tracing::debug!("{} new emails from {}", added, url);
                }

                // Completions not yet folded in still count as in flight
                if self.state.has_room_for(self.scheduler.in_flight() + unprocessed) {
                    self.enqueue_links(&page.links);
                }

                current_url = url.to_string();
                if scanned % self.progress_interval == 0 || scanned == self.state.page_budget() {
                    self.report_progress(observer, started, &current_url);
                }

                if self.state.budget_reached() {
                    break 'crawl;
                }
            }
        }

        let outcome = if self.state.budget_reached() {
            let outstanding = self.scheduler.cancel_pending();
            if outstanding > 0 {
                tracing::debug!("Cancelled {} outstanding fetches", outstanding);
            }
            CrawlOutcome::BudgetReached
        } else {
            CrawlOutcome::Exhausted
        };
        self.state.transition(CrawlPhase::from(outcome));

        self.report_progress(observer, started, &current_url);

        let report = CrawlReport {
            results: self.state.results().to_vec(),
            pages_scanned: self.state.pages_scanned(),
            urls_visited: self.state.visited_count(),
            duration: started.elapsed(),
            outcome,
        };

        observer.on_complete(&report);
        self.state.transition(CrawlPhase::Done);

        if report.is_empty() {
            tracing::warn!("No emails found");
        }

        report
    }

    /// Submits every unvisited same-domain link
    ///
    /// Stops early once the visited set holds as many URLs as the page budget.
    fn enqueue_links(&mut self, links: &BTreeSet<Url>) {
        for link in links {
            if !is_same_domain(link, &self.seed_netloc) {
                tracing::trace!("Skipping external link: {}", link);
                continue;
            }

            if !self.state.mark_visited(link) {
                continue;
            }

            self.scheduler.submit(link.clone());

            if self.state.visited_full() {
                break;
            }
        }
    }

    /// Emits a progress event and the current results
    fn report_progress(
        &self,
        observer: &mut dyn CrawlObserver,
        started: Instant,
        current_url: &str,
    ) {
        let progress = Progress {
            pages_scanned: self.state.pages_scanned(),
            emails_found: self.state.results().len(),
            elapsed: started.elapsed(),
            current_url: current_url.to_string(),
            page_budget: self.state.page_budget(),
        };

        observer.on_progress(&progress);
        observer.on_results_updated(self.state.results());
    }
}

/// Runs a complete crawl and returns its report
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `observer` - Receives progress and completion events
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl ran to completion
/// * `Err(SiftError)` - The crawl could not be started
///
/// # Example
///
/// ```no_run
/// use mailsift::config::Config;
/// use mailsift::crawler::run_crawl;
/// use mailsift::output::LoggingObserver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = Config::default();
/// config.crawler.start_url = "https://example.com/".to_string();
///
/// let report = run_crawl(config, &mut LoggingObserver).await?;
/// println!("{} emails", report.results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    observer: &mut dyn CrawlObserver,
) -> Result<CrawlReport, SiftError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(observer).await)
}
