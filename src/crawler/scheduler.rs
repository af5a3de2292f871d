//! Scheduler for dispatching fetches to a bounded worker pool
//!
//! This module handles:
//! - Spawning one task per submitted URL
//! - Global concurrency limiting via a semaphore (the pool width)
//! - Tracking which URL each in-flight task belongs to
//! - Waiting for the first completion, then draining every finished task
//! - Best-effort cancellation once the crawl stops
//!
//! The scheduler owns no crawl state. It hands completed fetches back to the
//! coordinator, which is the only place results are folded in.

use crate::crawler::fetcher::{fetch_page, FetchError, PageData};
use crate::extract::EmailExtractor;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use url::Url;

/// A fetch that has finished, successfully or not
#[derive(Debug)]
pub struct CompletedFetch {
    /// The URL that was submitted
    pub url: Url,

    /// What the fetch produced
    pub result: Result<PageData, FetchError>,
}

/// Scheduler manages the worker pool and the in-flight task table
///
/// Every submitted URL gets its own task immediately; tasks queue on the
/// semaphore so at most `worker_count` fetches touch the network at once.
pub struct Scheduler {
    /// Pool width; one permit per running fetch
    permits: Arc<Semaphore>,

    /// Submitted fetch tasks
    tasks: JoinSet<Result<PageData, FetchError>>,

    /// Source URL of every task in `tasks`
    in_flight: HashMap<Id, Url>,

    client: Client,
    extractor: Arc<EmailExtractor>,
    timeout: Duration,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client shared by all workers
    /// * `extractor` - Email extraction strategies shared by all workers
    /// * `worker_count` - Maximum number of concurrent fetches
    /// * `timeout` - Per-fetch timeout
    pub fn new(
        client: Client,
        extractor: Arc<EmailExtractor>,
        worker_count: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(worker_count)),
            tasks: JoinSet::new(),
            in_flight: HashMap::new(),
            client,
            extractor,
            timeout,
        }
    }

    /// Submits a URL for fetching
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self, url: Url) {
        let permits = Arc::clone(&self.permits);
        let client = self.client.clone();
        let extractor = Arc::clone(&self.extractor);
        let timeout = self.timeout;
        let task_url = url.clone();

        let handle = self.tasks.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| FetchError::Cancelled {
                    url: task_url.to_string(),
                })?;
            fetch_page(&client, &extractor, &task_url, timeout).await
        });

        tracing::trace!("Submitted {} as task {}", url, handle.id());
        self.in_flight.insert(handle.id(), url);
    }

    /// Number of submitted fetches that have not been handed back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns true if nothing is in flight
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Waits until at least one fetch completes, then collects every other
    /// fetch that has already completed
    ///
    /// Returns an empty vector only when nothing is in flight.
    pub async fn wait_for_completions(&mut self) -> Vec<CompletedFetch> {
        let mut completed = Vec::new();

        let Some(first) = self.tasks.join_next_with_id().await else {
            return completed;
        };
        completed.extend(self.complete(first));

        while let Some(next) = self.tasks.try_join_next_with_id() {
            completed.extend(self.complete(next));
        }

        completed
    }

    /// Maps a joined task back to its URL
    fn complete(
        &mut self,
        joined: Result<(Id, Result<PageData, FetchError>), JoinError>,
    ) -> Option<CompletedFetch> {
        match joined {
            Ok((id, result)) => {
                let url = self.in_flight.remove(&id)?;
                Some(CompletedFetch { url, result })
            }
            Err(error) => {
                let url = self.in_flight.remove(&error.id())?;
                tracing::warn!("Fetch task for {} failed: {}", url, error);
                Some(CompletedFetch {
                    result: Err(FetchError::Task {
                        url: url.to_string(),
                        message: error.to_string(),
                    }),
                    url,
                })
            }
        }
    }

    /// Stops dispatching and forgets every outstanding fetch
    ///
    /// Tasks still waiting for a worker give up without touching the network.
    /// Fetches already running are detached: they finish in the background
    /// and their results are dropped.
    ///
    /// # Returns
    ///
    /// The number of fetches that were outstanding
    pub fn cancel_pending(&mut self) -> usize {
        self.permits.close();
        self.tasks.detach_all();

        let outstanding = self.in_flight.len();
        self.in_flight.clear();
        outstanding
    }
}
