//! Concurrent page fetching with ordered reassembly
//!
//! This module handles:
//! - Fanning out one task per result page
//! - Collecting per-page outcomes through a single completion channel
//! - Applying the failure policy once every task has reported
//! - Restoring page order and truncating to the requested count

use crate::config::{Config, FailurePolicy};
use crate::document::parse_document;
use crate::extract::{extract_records, Record};
use crate::query::page_url;
use crate::search::fetcher::{build_http_client, fetch_page};
use crate::search::{page_count, Page};
use crate::SearchError;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use url::Url;

/// The single message each page task sends on the completion channel
#[derive(Debug)]
pub struct PageOutcome {
    /// Page sequence number assigned before dispatch
    pub seq: u32,

    /// Records found on the page, or why the page could not be read
    pub result: Result<Vec<Record>, SearchError>,
}

/// Scheduler fans a search out over result pages and reassembles the results
///
/// The scheduler coordinates:
/// - One concurrent task per page (no pool; the page count is caller bounded)
/// - A many-to-one completion channel closed only when every task is done
/// - Deterministic output order independent of completion order
pub struct Scheduler {
    /// Shared HTTP client (cheap to clone)
    client: Client,

    /// Search endpoint; `q` and `page` are appended per page
    base_url: Url,

    /// What a failed page does to the run
    policy: FailurePolicy,
}

impl Scheduler {
    /// Creates a scheduler from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scheduler)` - Ready to run searches
    /// * `Err(SearchError)` - Base URL or HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let client = build_http_client(&config.http)?;
        let base_url = Url::parse(&config.search.base_url)?;
        Ok(Self::with_client(
            client,
            base_url,
            config.search.failure_policy,
        ))
    }

    /// Creates a scheduler around an existing client
    pub fn with_client(client: Client, base_url: Url, policy: FailurePolicy) -> Self {
        Self {
            client,
            base_url,
            policy,
        }
    }

    /// Returns the active failure policy
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Runs a search and returns at most `count` records in page order
    ///
    /// Launches `ceil(count / PAGE_SIZE)` tasks with sequence numbers
    /// `1..=pages`, waits for all of them, then sorts by sequence number,
    /// flattens, and truncates. Under [`FailurePolicy::Abort`] a failed page
    /// fails the whole run, but only after every task has reported.
    pub async fn run(&self, query: &str, count: usize) -> Result<Vec<Record>, SearchError> {
        let pages = page_count(count)?;
        let query: Arc<str> = Arc::from(query);

        tracing::info!("Searching {} page(s) for up to {} records", pages, count);

        let (tx, mut rx) = mpsc::channel::<PageOutcome>(pages as usize);

        for seq in 1..=pages {
            let client = self.client.clone();
            let base_url = self.base_url.clone();
            let query = Arc::clone(&query);
            let tx = tx.clone();

            tokio::spawn(async move {
                let result = fetch_records(&client, &base_url, &query, seq).await;
                if tx.send(PageOutcome { seq, result }).await.is_err() {
                    tracing::warn!("Completion channel closed before page {} reported", seq);
                }
            });
        }

        // Each task holds its own sender; the channel closes once all are dropped
        drop(tx);

        let mut outcomes = Vec::with_capacity(pages as usize);
        while let Some(outcome) = rx.recv().await {
            tracing::debug!(
                "Page {} reported ({} of {})",
                outcome.seq,
                outcomes.len() + 1,
                pages
            );
            outcomes.push(outcome);
        }

        let settled = settle(outcomes, pages, self.policy)?;
        let records = assemble(settled, count);

        tracing::info!("Search finished with {} records", records.len());
        Ok(records)
    }
}

/// Fetches one page and extracts its records
async fn fetch_records(
    client: &Client,
    base_url: &Url,
    query: &str,
    seq: u32,
) -> Result<Vec<Record>, SearchError> {
    let url = page_url(base_url, query, seq);
    tracing::debug!("Fetching page {}: {}", seq, url);

    let body = fetch_page(client, &url).await?;
    let records = extract_page(&body);

    tracing::debug!("Page {} yielded {} records", seq, records.len());
    Ok(records)
}

/// Parses a results page and extracts its records
///
/// Kept synchronous so the parsed tree never lives across an await point.
fn extract_page(body: &str) -> Vec<Record> {
    let document = parse_document(body);
    extract_records(&document)
}

/// Checks that every page reported and applies the failure policy
///
/// A sequence number that never reported counts as a failed page. Under
/// `Abort` the error of the lowest failed sequence number is returned, so
/// the reported error does not depend on completion order.
pub fn settle(
    outcomes: Vec<PageOutcome>,
    expected: u32,
    policy: FailurePolicy,
) -> Result<Vec<Page>, SearchError> {
    let mut by_seq: BTreeMap<u32, Result<Vec<Record>, SearchError>> = BTreeMap::new();
    for outcome in outcomes {
        if by_seq.insert(outcome.seq, outcome.result).is_some() {
            tracing::warn!("Page {} reported more than once", outcome.seq);
        }
    }

    let mut pages = Vec::with_capacity(expected as usize);
    let mut first_failure = None;

    for seq in 1..=expected {
        let result = by_seq
            .remove(&seq)
            .unwrap_or_else(|| Err(SearchError::TaskLost { seq }));

        match result {
            Ok(records) => pages.push(Page { seq, records }),
            Err(e) => match policy {
                FailurePolicy::Abort => {
                    tracing::error!("Page {} failed: {}", seq, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
                FailurePolicy::Skip => {
                    tracing::warn!("Skipping page {}: {}", seq, e);
                }
            },
        }
    }

    for seq in by_seq.keys() {
        tracing::warn!("Ignoring report for unexpected page {}", seq);
    }

    match first_failure {
        Some(e) => Err(e),
        None => Ok(pages),
    }
}

/// Restores page order, flattens, and truncates to `count`
pub fn assemble(mut pages: Vec<Page>, count: usize) -> Vec<Record> {
    pages.sort_by_key(|page| page.seq);
    pages
        .into_iter()
        .flat_map(|page| page.records)
        .take(count)
        .collect()
}
