//! Search query construction
//!
//! This module turns free-text search terms into the `q` parameter the
//! package index expects, and builds the per-page request URLs.

use crate::SearchError;
use url::form_urlencoded;
use url::Url;

/// Separator between terms for a plain (AND) search
const AND_GLUE: &str = "+";

/// Separator between terms when results for any term should match
const OR_GLUE: &str = "+OR+";

/// Encoded double quote wrapping an exact-match phrase
const EXACT_QUOTE: &str = "%22";

/// Builds the encoded query string from search terms
///
/// Each term is form-urlencoded on its own (so a space inside a term becomes
/// `+`), then the terms are joined with `+`, or with `+OR+` when
/// `or_combine` is set. With `exact`, the whole query is wrapped in encoded
/// double quotes. Blank terms are ignored.
///
/// # Example
///
/// ```
/// use pkgscout::query::build_query;
///
/// let query = build_query(&["yaml", "json"], false, true).unwrap();
/// assert_eq!(query, "yaml+OR+json");
/// ```
pub fn build_query<S: AsRef<str>>(
    terms: &[S],
    exact: bool,
    or_combine: bool,
) -> Result<String, SearchError> {
    let encoded: Vec<String> = terms
        .iter()
        .map(|term| term.as_ref().trim())
        .filter(|term| !term.is_empty())
        .map(|term| form_urlencoded::byte_serialize(term.as_bytes()).collect())
        .collect();

    if encoded.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let glue = if or_combine { OR_GLUE } else { AND_GLUE };
    let query = encoded.join(glue);

    if exact {
        Ok(format!("{EXACT_QUOTE}{query}{EXACT_QUOTE}"))
    } else {
        Ok(query)
    }
}

/// Builds the URL for one result page: `<base>?q=<query>&page=<seq>`
///
/// Any query string already present on `base` is replaced. The query is
/// expected to be pre-encoded by [`build_query`] and is kept verbatim.
pub fn page_url(base: &Url, query: &str, seq: u32) -> Url {
    let mut url = base.clone();
    url.set_query(Some(&format!("q={}&page={}", query, seq)));
    url
}
