//! Crawl outcome reporting

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Why the crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every budget slot was admitted and all admitted URLs were processed
    BudgetExhausted,

    /// The reachable graph was exhausted before the budget was
    FrontierDrained,

    /// The wall-clock deadline expired with work still outstanding
    DeadlineExceeded,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::BudgetExhausted => write!(f, "budget-exhausted"),
            TerminationReason::FrontierDrained => write!(f, "frontier-drained"),
            TerminationReason::DeadlineExceeded => write!(f, "deadline-exceeded"),
        }
    }
}

/// Final result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Every URL admitted into the crawl
    pub visited: HashSet<String>,

    /// Number of URLs admitted (equals `visited.len()`)
    pub admitted: usize,

    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Per-URL fetch failures, recorded and skipped
    pub fetch_failures: usize,

    /// Why the crawl stopped
    pub termination: TerminationReason,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} admitted, {} fetched, {} failed in {:.2?} ({})",
            self.admitted,
            self.pages_fetched,
            self.fetch_failures,
            self.elapsed,
            self.termination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(TerminationReason::BudgetExhausted.to_string(), "budget-exhausted");
        assert_eq!(TerminationReason::FrontierDrained.to_string(), "frontier-drained");
        assert_eq!(TerminationReason::DeadlineExceeded.to_string(), "deadline-exceeded");
    }

    #[test]
    fn test_report_display() {
        let report = CrawlReport {
            visited: HashSet::new(),
            admitted: 3,
            pages_fetched: 2,
            fetch_failures: 1,
            termination: TerminationReason::FrontierDrained,
            elapsed: Duration::from_millis(150),
        };
        let rendered = report.to_string();
        assert!(rendered.contains("3 admitted"));
        assert!(rendered.contains("frontier-drained"));
    }
}
