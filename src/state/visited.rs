//! Deduplication ledger and crawl budget
//!
//! The visited set is the single source of truth for "do not refetch". A URL
//! enters the crawl through exactly one gate, [`VisitedSet::try_admit`],
//! which performs the membership check, the insert, and the budget
//! reservation as one atomic unit. Splitting those steps across separate
//! lock acquisitions allows the same URL to be fetched twice under
//! concurrency.

use std::collections::HashSet;
use std::sync::Mutex;
use url::Url;

/// Interior of the visited set, guarded by a single mutex
struct Admissions {
    seen: HashSet<String>,
    admitted: usize,
}

/// Set of every URL ever admitted into the crawl, capped by the page budget
///
/// Entries are never removed; the set strictly accumulates until the crawl
/// halts. Equality is exact string equality of the parsed URL, with no
/// normalization beyond what `Url` parsing itself does.
pub struct VisitedSet {
    inner: Mutex<Admissions>,
    max_pages: usize,
}

impl VisitedSet {
    /// Creates an empty visited set with the given page budget
    pub fn new(max_pages: usize) -> Self {
        Self {
            inner: Mutex::new(Admissions {
                seen: HashSet::new(),
                admitted: 0,
            }),
            max_pages,
        }
    }

    /// Atomically admits a URL into the crawl
    ///
    /// Returns `true` exactly once per URL, and only while the budget has
    /// room. Returns `false` if the URL was already admitted or the budget
    /// is exhausted. Concurrent calls with the same URL yield exactly one
    /// `true`.
    pub fn try_admit(&self, url: &Url) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.admitted >= self.max_pages {
            return false;
        }
        if inner.seen.contains(url.as_str()) {
            return false;
        }

        inner.seen.insert(url.as_str().to_string());
        inner.admitted += 1;
        true
    }

    /// Returns the number of URLs admitted so far
    pub fn admitted(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).admitted
    }

    /// Returns true once the budget is fully reserved
    ///
    /// Workers use this to stop walking a page's candidate links early; no
    /// further admit can ever succeed after this returns true.
    pub fn is_exhausted(&self) -> bool {
        self.admitted() >= self.max_pages
    }

    /// Returns the configured page budget
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Returns a copy of every admitted URL
    pub fn snapshot(&self) -> HashSet<String> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .seen
            .clone()
    }
}
