//! Human-readable run summary
//!
//! This module formats a finished `CrawlReport` for the terminal.

use crate::output::CrawlReport;
use std::collections::BTreeMap;
use std::fmt;

/// Display adapter that renders a finished `CrawlReport` as a summary
///
/// Lists every distinct address with the number of records it has (more than
/// one only when duplicates were kept).
pub struct Summary<'a>(pub &'a CrawlReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "=== Crawl Summary ===\n")?;
        writeln!(f, "Outcome: {}", report.outcome)?;
        writeln!(
            f,
            "Scanned {} pages in {:.2} seconds ({} URLs queued)",
            report.pages_scanned,
            report.duration.as_secs_f64(),
            report.urls_visited
        )?;

        if report.is_empty() {
            return writeln!(f, "\nNo emails found.");
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &report.results {
            *counts.entry(record.email.as_str()).or_insert(0) += 1;
        }

        writeln!(
            f,
            "\nEmails found: {} ({} unique)",
            report.results.len(),
            counts.len()
        )?;
        for (email, count) in counts {
            if count > 1 {
                writeln!(f, "  {} ({} pages)", email, count)?;
            } else {
                writeln!(f, "  {}", email)?;
            }
        }

        Ok(())
    }
}

/// Formats the summary of a finished crawl
pub fn format_summary(report: &CrawlReport) -> String {
    Summary(report).to_string()
}

/// Prints the summary of a finished crawl to stdout
pub fn print_summary(report: &CrawlReport) {
    print!("{}", Summary(report));
}
