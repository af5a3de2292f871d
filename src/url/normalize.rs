use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a raw `href` against a base URL and returns its canonical form
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; empty hrefs are skipped
/// 2. Resolve relative to `base` (absolute hrefs pass through)
/// 3. Reject anything that is not HTTP or HTTPS after resolution
///    (`mailto:`, `javascript:`, `tel:`, `data:`, ...)
/// 4. Strip the query string and fragment
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mailsift::url::normalize_link;
///
/// let base = Url::parse("https://example.com/team/").unwrap();
/// let link = normalize_link(&base, "../contact?ref=nav#form").unwrap();
/// assert_eq!(link.as_str(), "https://example.com/contact");
/// ```
pub fn normalize_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = base.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    Some(canonicalize(&resolved))
}

/// Returns a copy of `url` with its query string and fragment removed
pub fn canonicalize(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_query(None);
    canonical.set_fragment(None);
    canonical
}

/// Parses the seed URL of a crawl
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed, exactly as given (query intact)
/// * `Err(UrlError)` - Unparseable, non-HTTP(S), or host-less input
pub fn parse_seed_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
