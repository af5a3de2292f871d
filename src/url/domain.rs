use url::Url;

/// Returns the network location of a URL: host, plus the port when one is
/// given explicitly
///
/// Hosts are already lower-cased by the `url` parser. Default ports are not
/// reported by `Url::port`, so `https://example.com:443/` and
/// `https://example.com/` share a netloc.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mailsift::url::netloc;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(netloc(&url), "example.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(netloc(&url), "127.0.0.1:8080");
/// ```
pub fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// Returns true if `url` is on the crawl's domain
///
/// A URL with no host counts as internal. Subdomains are not: `blog.example.com`
/// is a different netloc from `example.com`.
pub fn is_same_domain(url: &Url, seed_netloc: &str) -> bool {
    let candidate = netloc(url);
    candidate.is_empty() || candidate == seed_netloc
}
