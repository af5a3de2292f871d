use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Mailsift
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URL the crawl starts from
    #[serde(rename = "start-url", default)]
    pub start_url: String,

    /// Page budget: the crawl stops once this many pages have been scanned
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of fetches allowed to run at the same time
    #[serde(rename = "worker-count", default = "default_worker_count")]
    pub worker_count: usize,

    /// Per-fetch timeout in seconds
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: f64,

    /// Keep only the first record for each email address
    #[serde(rename = "deduplicate-emails", default = "default_true")]
    pub deduplicate_emails: bool,
}

impl CrawlerConfig {
    /// Returns the per-fetch timeout as a `Duration`
    ///
    /// Values validation would reject saturate to `Duration::MAX`.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds).unwrap_or(Duration::MAX)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            max_pages: default_max_pages(),
            worker_count: default_worker_count(),
            timeout_seconds: default_timeout_seconds(),
            deduplicate_emails: true,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header value
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Skip TLS certificate verification
    #[serde(rename = "accept-invalid-certs", default = "default_true")]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_invalid_certs: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV export; derived from the seed domain when unset
    #[serde(rename = "csv-path", default)]
    pub csv_path: Option<PathBuf>,

    /// Emit a progress event every this many scanned pages
    #[serde(rename = "progress-interval", default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            progress_interval: default_progress_interval(),
        }
    }
}

fn default_max_pages() -> usize {
    100
}

fn default_worker_count() -> usize {
    20
}

fn default_timeout_seconds() -> f64 {
    5.0
}

fn default_progress_interval() -> usize {
    5
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}
