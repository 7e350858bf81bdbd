//! Search module for fetching and reassembling result pages
//!
//! This module contains the core search logic, including:
//! - HTTP fetching of result pages
//! - Concurrent per-page tasks feeding a completion channel
//! - Failure policy and ordered reassembly

mod fetcher;
mod scheduler;

pub use fetcher::{build_http_client, fetch_page};
pub use scheduler::{assemble, settle, PageOutcome, Scheduler};

use crate::config::Config;
use crate::extract::Record;
use crate::SearchError;

/// Number of results the index returns per page
pub const PAGE_SIZE: usize = 10;

/// One fetched-and-extracted results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number, equal to the index's `page` parameter
    pub seq: u32,

    /// Records in document order
    pub records: Vec<Record>,
}

/// Number of pages needed to cover `count` records
///
/// # Errors
///
/// `InvalidCount` if `count` is zero or needs more pages than fit in a `u32`.
pub fn page_count(count: usize) -> Result<u32, SearchError> {
    if count == 0 {
        return Err(SearchError::InvalidCount(count));
    }
    u32::try_from(count.div_ceil(PAGE_SIZE)).map_err(|_| SearchError::InvalidCount(count))
}

/// Runs a complete search
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client from configuration
/// 2. Fetch every needed page concurrently
/// 3. Extract records from each page
/// 4. Return at most `count` records in page order
///
/// # Arguments
///
/// * `config` - The configuration
/// * `query` - Encoded query from [`crate::query::build_query`]
/// * `count` - Maximum number of records to return
///
/// # Example
///
/// ```no_run
/// use pkgscout::{build_query, search, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let query = build_query(&["yaml", "json"], false, true)?;
/// let records = search(&Config::default(), &query, 15).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search(config: &Config, query: &str, count: usize) -> Result<Vec<Record>, SearchError> {
    Scheduler::new(config)?.run(query, count).await
}
