//! Aggregate state for one crawl run
//!
//! A `CrawlState` bundles the visited set, the frontier, and the counters
//! the dispatcher needs for its termination check. It is created at crawl
//! start, shared by `Arc` into every worker task, and read out once at the
//! end to build the report.

use crate::state::{Frontier, VisitedSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared mutable state for a single crawl
pub struct CrawlState {
    /// Deduplication ledger and budget, see [`VisitedSet`]
    pub visited: VisitedSet,

    /// Queue of admitted URLs awaiting fetch
    pub frontier: Frontier,

    /// Number of fetch tasks currently executing
    in_flight: AtomicUsize,

    /// Pages fetched successfully
    fetched: AtomicUsize,

    /// Per-URL fetch failures (recorded and skipped, never fatal)
    failed: AtomicUsize,
}

impl CrawlState {
    /// Creates fresh state for a crawl with the given page budget
    pub fn new(max_pages: usize) -> Self {
        Self {
            visited: VisitedSet::new(max_pages),
            frontier: Frontier::new(),
            in_flight: AtomicUsize::new(0),
            fetched: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Reserves an in-flight slot for a fetch task about to be spawned
    ///
    /// The returned guard decrements the counter exactly once when dropped,
    /// on every exit path of the task. The increment happens here, before
    /// the task runs, so the dispatcher never observes "frontier empty, zero
    /// in flight" while a just-spawned task is still waiting to start.
    pub fn begin_fetch(self: &Arc<Self>) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            state: Arc::clone(self),
        }
    }

    /// Returns the number of fetch tasks currently executing
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Records one successful fetch
    pub fn record_success(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one failed fetch
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Successful fetch count
    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::Relaxed)
    }

    /// Failed fetch count
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

/// RAII guard keeping the in-flight count accurate
///
/// Dropping the guard is the only way the count goes down, so success,
/// extraction error, fetch error, and task cancellation all decrement it
/// exactly once.
pub struct InFlightGuard {
    state: Arc<CrawlState>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard_decrements_on_drop() {
        let state = Arc::new(CrawlState::new(10));
        assert_eq!(state.in_flight(), 0);

        let guard = state.begin_fetch();
        assert_eq!(state.in_flight(), 1);

        let second = state.begin_fetch();
        assert_eq!(state.in_flight(), 2);

        drop(guard);
        assert_eq!(state.in_flight(), 1);
        drop(second);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn test_counters() {
        let state = CrawlState::new(10);
        state.record_success();
        state.record_success();
        state.record_failure();

        assert_eq!(state.fetched(), 2);
        assert_eq!(state.failed(), 1);
    }
}
