//! Shared crawl state
//!
//! Everything in this module is safe to share across the dispatcher and all
//! worker tasks via `Arc`. Nothing here is ambient or static, so multiple
//! independent crawls can run in the same process.

mod crawl_state;
mod frontier;
mod visited;

pub use crawl_state::{CrawlState, InFlightGuard};
pub use frontier::Frontier;
pub use visited::VisitedSet;
