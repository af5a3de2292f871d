//! Output module: progress events, CSV export and run summaries
//!
//! This module handles:
//! - The observer contract a presentation layer implements to follow a crawl
//! - Exporting collected email records as CSV
//! - Printing a human-readable summary of a finished run

mod csv_export;
mod summary;
mod traits;

pub use csv_export::{default_export_path, export_csv, write_csv};
pub use summary::{format_summary, print_summary, Summary};
pub use traits::{CrawlObserver, CrawlReport, LoggingObserver, Progress};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
