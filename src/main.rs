//! Mailsift main entry point
//!
//! This is the command-line interface for the Mailsift email crawler.

use anyhow::Context;
use clap::Parser;
use mailsift::config::{load_config_with_hash, Config};
use mailsift::crawler::Coordinator;
use mailsift::output::{default_export_path, export_csv, print_summary, LoggingObserver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mailsift: find the contact emails of a site
///
/// Mailsift crawls a website from a start URL, never leaving its host, and
/// collects every email address it finds, including ones hidden behind
/// Cloudflare email protection or written as "name [at] domain [dot] com".
#[derive(Parser, Debug)]
#[command(name = "mailsift")]
#[command(version = "1.0.0")]
#[command(about = "A same-domain crawler for contact email addresses", long_about = None)]
struct Cli {
    /// URL to start crawling from (overrides `start-url` in the config file)
    #[arg(value_name = "START_URL")]
    start_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to scan
    #[arg(short = 'p', long, value_name = "N")]
    max_pages: Option<usize>,

    /// Number of concurrent fetches
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Per-page timeout in seconds
    #[arg(short, long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Keep one record per page an address appears on
    #[arg(long)]
    keep_duplicates: bool,

    /// Verify TLS certificates
    #[arg(long)]
    strict_tls: bool,

    /// Where to write the CSV export (default: emails_<domain>.csv)
    #[arg(short, long, value_name = "FILE", conflicts_with = "no_export")]
    output: Option<PathBuf>,

    /// Do not write a CSV export
    #[arg(long)]
    no_export: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(start_url) = &self.start_url {
            config.crawler.start_url = start_url.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(workers) = self.workers {
            config.crawler.worker_count = workers;
        }
        if let Some(timeout) = self.timeout {
            config.crawler.timeout_seconds = timeout;
        }
        if self.keep_duplicates {
            config.crawler.deduplicate_emails = false;
        }
        if self.strict_tls {
            config.http.accept_invalid_certs = false;
        }
        if let Some(output) = &self.output {
            config.output.csv_path = Some(output.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };
    cli.apply_to(&mut config);

    let csv_path = config.output.csv_path.clone();
    let coordinator = Coordinator::new(config).context("cannot start crawl")?;
    let seed = coordinator.seed().clone();

    let report = coordinator.run(&mut LoggingObserver).await;

    if !cli.quiet {
        print_summary(&report);
    }

    if cli.no_export || report.is_empty() {
        return Ok(());
    }

    let path = csv_path.unwrap_or_else(|| default_export_path(&seed));
    export_csv(&report.results, &path)
        .with_context(|| format!("failed to export {}", path.display()))?;
    if !cli.quiet {
        println!("\nResults saved to {}", path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailsift=info,warn"),
            1 => EnvFilter::new("mailsift=debug,info"),
            2 => EnvFilter::new("mailsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
