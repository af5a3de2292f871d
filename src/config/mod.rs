//! Configuration module for Mailsift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default except `start-url`, which may instead be supplied on
//! the command line.
//!
//! # Example
//!
//! ```no_run
//! use mailsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mailsift.toml")).unwrap();
//! println!("Crawl budget: {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
