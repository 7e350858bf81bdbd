//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the search, including:
//! - Building the HTTP client from configuration
//! - GET requests for result pages
//! - Error classification (transport, timeout, status, content type)
//!
//! There is no retry: a failed request is reported to the scheduler, which
//! applies the configured failure policy.

use crate::config::HttpConfig;
use crate::SearchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use pkgscout::config::HttpConfig;
/// use pkgscout::search::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .build()
}

/// Fetches one results page and returns its body
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request timed out | `Timeout` |
/// | Connection or body read failed | `Http` |
/// | Non-2xx status | `Status` |
/// | Content-Type present and not HTML | `HtmlParse` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, SearchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(SearchError::HtmlParse {
            url: url.to_string(),
            message: format!("expected text/html, got {}", content_type),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

/// A missing Content-Type is given the benefit of the doubt
fn is_html(content_type: &str) -> bool {
    content_type.is_empty() || content_type.to_ascii_lowercase().contains("text/html")
}

fn classify_error(url: &Url, error: reqwest::Error) -> SearchError {
    if error.is_timeout() {
        SearchError::Timeout {
            url: url.to_string(),
        }
    } else {
        SearchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
