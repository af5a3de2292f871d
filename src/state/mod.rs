//! State module for tracking a crawl run
//!
//! # Components
//!
//! - `CrawlState`: visited URLs, collected email records and page counters
//!   for one run, owned by the coordinator's control loop
//! - `CrawlPhase`: lifecycle of a run (`Idle → Running → BudgetReached |
//!   Exhausted → Done`)
//! - `EmailRecord`: one address together with the page it was found on

mod crawl_phase;
mod crawl_state;

// Re-export main types
pub use crawl_phase::{CrawlOutcome, CrawlPhase};
pub use crawl_state::{CrawlState, EmailRecord};
