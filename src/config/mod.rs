//! Configuration module for pkgscout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional, so running without a file is the same as loading an
//! empty one.
//!
//! # Example
//!
//! ```no_run
//! use pkgscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pkgscout.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FailurePolicy, HttpConfig, SearchConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
