//! HTML parser for extracting links, title and visible text
//!
//! This module pulls out the parts of a fetched page the crawler needs:
//! - Outbound links from `<a href>` tags, in canonical form
//! - The page title
//! - The visible text the email patterns are run against

use crate::url::normalize_link;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Title used for pages without a usable `<title>`
pub const NO_TITLE: &str = "N/A";

/// Elements whose text content is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extracts the page title from the HTML document
///
/// Returns `None` if there is no `<title>` or it only holds whitespace.
pub fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts every followable link on the page, canonicalized against `base_url`
///
/// Hrefs that do not resolve to an HTTP(S) URL are skipped one by one; a bad
/// link never affects the rest of the page.
///
/// # Example
///
/// ```
/// use mailsift::crawler::extract_links;
/// use scraper::Html;
/// use url::Url;
///
/// let html = r#"<a href="/about?x=1">About</a><a href="mailto:a@b.com">Mail</a>"#;
/// let document = Html::parse_document(html);
/// let base = Url::parse("https://example.com/").unwrap();
///
/// let links = extract_links(&document, &base);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains(&Url::parse("https://example.com/about").unwrap()));
/// ```
pub fn extract_links(document: &Html, base_url: &Url) -> BTreeSet<Url> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| {
            let link = normalize_link(base_url, href);
            if link.is_none() {
                tracing::trace!("Skipping unfollowable href: {}", href);
            }
            link
        })
        .collect()
}

/// Collects the visible text of the document
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with a
/// single space. Text inside `<script>`, `<style>` and `<template>` is left out.
pub fn visible_text(document: &Html) -> String {
    let mut fragments = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            fragments.push(trimmed);
        }
    }

    fragments.join(" ")
}
