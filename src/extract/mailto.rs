use crate::extract::{EmailStrategy, PageContent, EMAIL_EXACT};
use once_cell::sync::Lazy;
use scraper::Selector;
use std::collections::BTreeSet;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

const MAILTO_SCHEME: &str = "mailto:";

/// Reads addresses out of `mailto:` anchors
///
/// The scheme is matched case-insensitively. Anything from the first `?`
/// onwards (subject, cc, body) is dropped, and what remains must match the
/// email grammar in full.
pub struct MailtoStrategy;

impl EmailStrategy for MailtoStrategy {
    fn name(&self) -> &'static str {
        "mailto"
    }

    fn extract(&self, page: &PageContent<'_>) -> BTreeSet<String> {
        page.document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(mailto_address)
            .collect()
    }
}

/// Returns the address of a `mailto:` href, or `None` if the href is not a
/// mailto link or the address does not look like an email
fn mailto_address(href: &str) -> Option<String> {
    let href = href.trim();
    let scheme = href.get(..MAILTO_SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(MAILTO_SCHEME) {
        return None;
    }

    let rest = &href[MAILTO_SCHEME.len()..];
    let candidate = rest.split('?').next().unwrap_or_default().trim();

    if EMAIL_EXACT.is_match(candidate) {
        Some(candidate.to_string())
    } else {
        tracing::trace!("Mailto content failed email check: {}", candidate);
        None
    }
}
