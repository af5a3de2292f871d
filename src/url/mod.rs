//! URL handling module for Mailsift
//!
//! This module resolves raw `href` values into canonical absolute URLs and
//! decides whether a URL belongs to the crawl's domain.
//!
//! A canonical URL is scheme, host, port and path. Query strings and fragments
//! are dropped, so two links that differ only in those parts name the same page.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{is_same_domain, netloc};
pub use normalize::{canonicalize, normalize_link, parse_seed_url};
