//! pkgscout: concurrent package-index search
//!
//! This crate queries a paginated package index, extracts one record per
//! search result from each page's markup, and reassembles the pages into a
//! single ordered list no matter which request finished first.

pub mod config;
pub mod document;
pub mod extract;
pub mod output;
pub mod query;
pub mod search;

use thiserror::Error;

/// Main error type for pkgscout operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Requested record count must be at least 1, got {0}")]
    InvalidCount(usize),

    #[error("At least one search term is required")]
    EmptyQuery,

    #[error("Page task {seq} ended without reporting a result")]
    TaskLost { seq: u32 },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for pkgscout operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, FailurePolicy};
pub use extract::{extract_records, Record};
pub use query::{build_query, page_url};
pub use search::{page_count, search, Page, PAGE_SIZE};
