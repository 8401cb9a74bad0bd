//! Crawl dispatcher - main crawl orchestration logic
//!
//! The dispatcher drives one crawl to completion: it seeds the frontier,
//! keeps up to `concurrency` fetch tasks in flight, funnels every discovered
//! URL through the admission gate, and decides when the crawl is over.
//!
//! Termination is the nontrivial part. The frontier being empty is not
//! enough: a worker mid-fetch may be about to enqueue ten more URLs. The
//! crawl is only done when the frontier is empty AND no fetch task is in
//! flight; which of those two facts caps the run (budget or graph) decides
//! the reported reason.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::LinkExtractor;
use crate::crawler::report::{CrawlReport, TerminationReason};
use crate::state::CrawlState;
use crate::CrawlError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Tuning knobs for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Maximum number of distinct URLs ever admitted into the crawl
    pub max_pages: usize,

    /// Fixed number of concurrent fetch tasks
    pub concurrency: usize,

    /// Wall-clock budget for the whole run
    pub deadline: Duration,

    /// How long to wait for in-flight fetches after the deadline expires
    /// before they are aborted
    pub shutdown_grace: Duration,

    /// How long one frontier wait may block before the dispatcher re-checks
    /// the deadline and the termination condition
    pub frontier_poll: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 100,
            concurrency: 8,
            deadline: Duration::from_secs(300),
            shutdown_grace: Duration::from_secs(5),
            frontier_poll: Duration::from_millis(50),
        }
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages as usize,
            concurrency: config.concurrency as usize,
            deadline: Duration::from_secs(config.deadline_secs),
            shutdown_grace: Duration::from_secs(config.shutdown_grace_secs),
            frontier_poll: Duration::from_millis(50),
        }
    }
}

/// Drives one crawl from seed to completion
pub struct Dispatcher<F, X> {
    state: Arc<CrawlState>,
    fetcher: Arc<F>,
    extractor: Arc<X>,
    options: CrawlOptions,
}

impl<F: Fetcher, X: LinkExtractor> Dispatcher<F, X> {
    /// Creates a dispatcher and admits the seed URL
    ///
    /// Setup-level input problems (malformed seed, zero budget, zero
    /// concurrency, zero deadline) are rejected here, before any fetch.
    pub fn new(
        seed_url: &str,
        options: CrawlOptions,
        fetcher: F,
        extractor: X,
    ) -> Result<Self, CrawlError> {
        if options.max_pages == 0 {
            return Err(CrawlError::ZeroBudget);
        }
        if options.concurrency == 0 {
            return Err(CrawlError::ZeroConcurrency);
        }
        if options.deadline.is_zero() {
            return Err(CrawlError::ZeroDeadline);
        }

        let seed = Url::parse(seed_url).map_err(|e| CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;
        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(CrawlError::InvalidSeed {
                url: seed_url.to_string(),
                reason: format!("unsupported scheme '{}'", seed.scheme()),
            });
        }

        let state = Arc::new(CrawlState::new(options.max_pages));

        // Seed: admit first, push second. The budget is at least 1, so this
        // admit cannot fail.
        state.visited.try_admit(&seed);
        state.frontier.push(seed);

        Ok(Self {
            state,
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            options,
        })
    }

    /// Runs the crawl to completion and returns the report
    pub async fn run(self) -> Result<CrawlReport, CrawlError> {
        let started = Instant::now();
        let deadline = started + self.options.deadline;
        let mut tasks: JoinSet<()> = JoinSet::new();

        tracing::info!(
            "Starting crawl: budget {} pages, {} workers, deadline {:?}",
            self.options.max_pages,
            self.options.concurrency,
            self.options.deadline
        );

        let termination = loop {
            let now = Instant::now();
            if now >= deadline {
                tracing::info!("Deadline reached, shutting down");
                break TerminationReason::DeadlineExceeded;
            }

            // Reap finished tasks without blocking
            while let Some(result) = tasks.try_join_next() {
                if let Err(e) = result {
                    tracing::error!("Fetch task failed to join: {}", e);
                }
            }

            // Top up the pool from the frontier
            while tasks.len() < self.options.concurrency {
                match self.state.frontier.try_pop() {
                    Some(url) => self.spawn_fetch(&mut tasks, url),
                    None => break,
                }
            }

            // Joint termination check: queue empty alone is not enough
            if tasks.is_empty() && self.state.in_flight() == 0 && self.state.frontier.is_empty() {
                if self.state.visited.is_exhausted() {
                    break TerminationReason::BudgetExhausted;
                }
                break TerminationReason::FrontierDrained;
            }

            let wait = self
                .options
                .frontier_poll
                .min(deadline.saturating_duration_since(now));

            if tasks.len() >= self.options.concurrency {
                // Pool is full; wait for a completion
                match tokio::time::timeout(wait, tasks.join_next()).await {
                    Ok(Some(Err(e))) => tracing::error!("Fetch task failed to join: {}", e),
                    Ok(_) => {}
                    Err(_) => {}
                }
            } else {
                // Pool has room but the frontier is transiently empty.
                // Workers are still in flight, so new URLs may yet arrive;
                // wait rather than terminate.
                if let Some(url) = self.state.frontier.pop_or_wait(wait).await {
                    self.spawn_fetch(&mut tasks, url);
                }
            }
        };

        self.drain(&mut tasks).await;

        let report = CrawlReport {
            visited: self.state.visited.snapshot(),
            admitted: self.state.visited.admitted(),
            pages_fetched: self.state.fetched(),
            fetch_failures: self.state.failed(),
            termination,
            elapsed: started.elapsed(),
        };

        tracing::info!("Crawl complete: {}", report);
        Ok(report)
    }

    /// Spawns one fetch-extract-enqueue task for an admitted URL
    ///
    /// The in-flight slot is reserved before the task is spawned so the
    /// termination check never sees a gap between spawn and first poll.
    fn spawn_fetch(&self, tasks: &mut JoinSet<()>, url: Url) {
        let guard = self.state.begin_fetch();
        let state = Arc::clone(&self.state);
        let fetcher = Arc::clone(&self.fetcher);
        let extractor = Arc::clone(&self.extractor);

        tasks.spawn(async move {
            // Held for the whole task body; drops exactly once on every
            // exit path, including cancellation.
            let _guard = guard;

            match fetcher.fetch(&url).await {
                Ok(page) => {
                    let candidates = extractor.extract(&page.body, &page.final_url);
                    let mut queued = 0usize;
                    for candidate in candidates {
                        if state.visited.is_exhausted() {
                            break;
                        }
                        if state.visited.try_admit(&candidate) {
                            state.frontier.push(candidate);
                            queued += 1;
                        }
                    }
                    state.record_success();
                    tracing::debug!("Fetched {} ({} new URLs queued)", url, queued);
                }
                Err(error) => {
                    state.record_failure();
                    tracing::warn!("Fetch failed for {}: {}", url, error);
                }
            }
        });
    }

    /// Waits up to the shutdown grace for in-flight fetches, then aborts
    /// the rest
    async fn drain(&self, tasks: &mut JoinSet<()>) {
        if tasks.is_empty() {
            return;
        }

        let grace = self.options.shutdown_grace;
        let all_joined = tokio::time::timeout(grace, async {
            while let Some(result) = tasks.join_next().await {
                if let Err(e) = result {
                    tracing::error!("Fetch task failed to join: {}", e);
                }
            }
        })
        .await;

        if all_joined.is_err() {
            tracing::warn!(
                "Shutdown grace of {:?} expired, aborting {} in-flight fetches",
                grace,
                tasks.len()
            );
            tasks.shutdown().await;
        }
    }
}
