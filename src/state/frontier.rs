//! Frontier queue of URLs awaiting fetch
//!
//! An unbounded FIFO shared between the dispatcher (consumer) and all
//! workers (producers). FIFO order is what gives the crawl its breadth-first
//! shape; it is not required for correctness. Every URL in the frontier has
//! already passed admission, so the queue itself never deduplicates.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use url::Url;

/// Thread-safe FIFO queue of admitted URLs
pub struct Frontier {
    queue: Mutex<VecDeque<Url>>,
    notify: Notify,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Appends a URL to the back of the queue
    ///
    /// Callers must only push URLs that passed [`crate::VisitedSet::try_admit`];
    /// admission happens-before push.
    pub fn push(&self, url: Url) {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(url);
        self.notify.notify_one();
    }

    /// Removes and returns the oldest entry, if any
    pub fn try_pop(&self) -> Option<Url> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    /// Removes and returns the oldest entry, waiting up to `wait` for one to
    /// arrive
    ///
    /// Returns `None` if the queue stayed empty for the whole wait. A `None`
    /// here does not mean the crawl is done; workers still in flight may
    /// push more URLs. Termination is the dispatcher's call.
    pub async fn pop_or_wait(&self, wait: Duration) -> Option<Url> {
        let deadline = tokio::time::Instant::now() + wait;

        loop {
            if let Some(url) = self.try_pop() {
                return Some(url);
            }

            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                // Timed out; one last check in case a push raced the timeout
                return self.try_pop();
            }
        }
    }

    /// Returns the number of queued URLs
    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let frontier = Frontier::new();
        frontier.push(url("https://example.com/a"));
        frontier.push(url("https://example.com/b"));
        frontier.push(url("https://example.com/c"));

        assert_eq!(frontier.try_pop().unwrap().as_str(), "https://example.com/a");
        assert_eq!(frontier.try_pop().unwrap().as_str(), "https://example.com/b");
        assert_eq!(frontier.try_pop().unwrap().as_str(), "https://example.com/c");
        assert!(frontier.try_pop().is_none());
    }

    #[tokio::test]
    async fn test_pop_or_wait_times_out_when_empty() {
        let frontier = Frontier::new();
        let popped = frontier.pop_or_wait(Duration::from_millis(20)).await;
        assert!(popped.is_none());
    }

    #[tokio::test]
    async fn test_pop_or_wait_wakes_on_push() {
        let frontier = Arc::new(Frontier::new());

        let producer = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                frontier.push(url("https://example.com/late"));
            })
        };

        let popped = frontier.pop_or_wait(Duration::from_secs(5)).await;
        producer.await.unwrap();

        assert_eq!(popped.unwrap().as_str(), "https://example.com/late");
    }

    #[tokio::test]
    async fn test_pop_returns_immediately_when_nonempty() {
        let frontier = Frontier::new();
        frontier.push(url("https://example.com/ready"));

        let start = std::time::Instant::now();
        let popped = frontier.pop_or_wait(Duration::from_secs(10)).await;
        assert!(popped.is_some());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
