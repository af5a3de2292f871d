//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with a browser-like User-Agent
//! - GET requests with a per-fetch timeout
//! - Error classification into `FetchError`
//! - Turning a fetched body into email records and outbound links
//!
//! A fetch never retries. Failures are returned as `FetchError` so they can
//! be logged; the coordinator treats every failure as a page with no data.

use crate::config::HttpConfig;
use crate::crawler::parser::{extract_links, extract_title, visible_text, NO_TITLE};
use crate::extract::{EmailExtractor, PageContent};
use crate::state::EmailRecord;
use reqwest::{redirect::Policy, Client, StatusCode};
use scraper::Html;
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum number of redirects followed per fetch
const MAX_REDIRECTS: usize = 10;

/// Why a page produced no data
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Fetch of {url} was cancelled")]
    Cancelled { url: String },

    #[error("Fetch task for {url} did not complete: {message}")]
    Task { url: String, message: String },
}

impl FetchError {
    /// Classifies a `reqwest` send error
    fn from_send(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else if error.is_connect() {
            FetchError::Connect {
                url,
                message: error.to_string(),
            }
        } else {
            FetchError::Transport {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// What a successfully fetched page contributed
#[derive(Debug, Clone, Default)]
pub struct PageData {
    /// Final URL after redirects
    pub final_url: String,

    /// Page title, or `"N/A"`
    pub title: String,

    /// One record per distinct address found on the page
    pub emails: Vec<EmailRecord>,

    /// Canonical outbound links, of any domain
    pub links: BTreeSet<Url>,
}

/// Builds the HTTP client shared by every fetch of a run
///
/// `reqwest::Client` pools connections internally and is cheap to clone, so
/// workers each hold a clone and no locking is involved.
///
/// # Example
///
/// ```
/// use mailsift::config::HttpConfig;
/// use mailsift::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    if config.accept_invalid_certs {
        tracing::debug!("TLS certificate verification is disabled");
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and extracts its emails and links
///
/// # Request Flow
///
/// 1. GET `url` with the given timeout, following redirects
/// 2. Anything other than HTTP 200 → `FetchError::Status`
/// 3. Read the body as text
/// 4. Parse and analyze against the final URL (see `analyze_page`)
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `extractor` - Email extraction strategies
/// * `url` - The URL to fetch
/// * `timeout` - Timeout for the whole request
pub async fn fetch_page(
    client: &Client,
    extractor: &EmailExtractor,
    url: &Url,
    timeout: Duration,
) -> Result<PageData, FetchError> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchError::from_send(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(analyze_page(&body, &final_url, extractor))
}

/// Parses a page body and runs link and email extraction over it
///
/// Relative links are resolved against `final_url`, and every email record
/// carries `final_url` and the page title.
pub fn analyze_page(body: &str, final_url: &Url, extractor: &EmailExtractor) -> PageData {
    let document = Html::parse_document(body);

    let title = extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string());
    let text = visible_text(&document);
    let page = PageContent {
        document: &document,
        text: &text,
    };

    let emails = extractor
        .extract(&page)
        .into_iter()
        .map(|email| EmailRecord {
            email,
            page_url: final_url.to_string(),
            page_title: title.clone(),
        })
        .collect();

    let links = extract_links(&document, final_url);

    PageData {
        final_url: final_url.to_string(),
        title,
        emails,
        links,
    }
}
