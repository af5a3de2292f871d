//! Email extraction from fetched pages
//!
//! Three independent strategies look for addresses on every page:
//! - `CloudflareStrategy`: decodes `data-cfemail` attributes
//! - `MailtoStrategy`: reads `mailto:` anchors
//! - `TextPatternStrategy`: rewrites "[at]"/"[dot]" style obfuscation in the
//!   visible text, then pattern-matches addresses
//!
//! `EmailExtractor` runs all of them, unions the results and drops anything
//! too long to be a real address.

mod cloudflare;
mod mailto;
mod text;

pub use cloudflare::{decode_cf_email, CloudflareStrategy};
pub use mailto::MailtoStrategy;
pub use text::{deobfuscate, TextPatternStrategy};

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::collections::BTreeSet;

/// Candidates this many characters or longer are discarded
pub const MAX_EMAIL_LEN: usize = 50;

/// Email grammar: `local@domain.tld` with an alphabetic TLD of 2+ characters
pub(crate) static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// The email grammar anchored at both ends, for validating a single candidate
pub(crate) static EMAIL_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// A parsed page as seen by the extraction strategies
pub struct PageContent<'a> {
    /// The parsed document
    pub document: &'a Html,

    /// Visible text of the document, fragments joined by single spaces
    pub text: &'a str,
}

/// One way of finding email addresses on a page
pub trait EmailStrategy: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Returns every candidate address this strategy finds on the page
    ///
    /// Malformed input contributes nothing; strategies never fail.
    fn extract(&self, page: &PageContent<'_>) -> BTreeSet<String>;
}

/// Runs a set of strategies and merges their findings
pub struct EmailExtractor {
    strategies: Vec<Box<dyn EmailStrategy>>,
}

impl EmailExtractor {
    /// Creates an extractor from an explicit list of strategies
    pub fn with_strategies(strategies: Vec<Box<dyn EmailStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extracts the set of candidate addresses from a page
    ///
    /// # Example
    ///
    /// ```
    /// use mailsift::extract::{EmailExtractor, PageContent};
    /// use scraper::Html;
    ///
    /// let document = Html::parse_document(r#"<a href="mailto:hi@example.com">Mail</a>"#);
    /// let page = PageContent { document: &document, text: "or sales [at] example [dot] com" };
    /// let emails = EmailExtractor::default().extract(&page);
    ///
    /// assert!(emails.contains("hi@example.com"));
    /// assert!(emails.contains("sales@example.com"));
    /// ```
    pub fn extract(&self, page: &PageContent<'_>) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        for strategy in &self.strategies {
            let candidates = strategy.extract(page);
            tracing::trace!(
                "Strategy {} found {} candidates",
                strategy.name(),
                candidates.len()
            );
            found.extend(candidates);
        }

        found.retain(|email| email.chars().count() < MAX_EMAIL_LEN);
        found
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(CloudflareStrategy),
            Box::new(MailtoStrategy),
            Box::new(TextPatternStrategy),
        ])
    }
}
