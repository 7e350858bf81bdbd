//! Record extraction from search result pages
//!
//! A results page contains one "snippet" block per matched package. Each
//! block is decoded independently: a block with a missing or incomplete part
//! is skipped, and the rest of the page is still returned.
//!
//! The class names and positional offsets below encode the index's current
//! markup layout. That layout is unversioned, so they are the first thing to
//! check when extraction suddenly yields nothing.

mod record;

pub use record::Record;

use crate::document::{find, find_first, valid_texts, NodeRef, Predicate};
use scraper::Html;
use thiserror::Error;

/// Class of one result block
pub const SNIPPET_CLASS: &str = "SearchSnippet";

/// Class of the block's header (package name and path)
pub const HEADER_CLASS: &str = "SearchSnippet-headerContainer";

/// Class of the block's one-line description
pub const SYNOPSIS_CLASS: &str = "SearchSnippet-synopsis";

/// Class of the block's metadata line
pub const INFO_LABEL_CLASS: &str = "SearchSnippet-infoLabel";

/// Header text positions
const HEADER_NAME: usize = 0;
const HEADER_PATH: usize = 1;

/// Info label text positions. 0 is the "Imported by" label and 3 is the
/// "published on" filler between version and date.
const INFO_IMPORTED_BY: usize = 1;
const INFO_VERSION: usize = 2;
const INFO_PUBLISHED: usize = 4;
const INFO_LICENSE: usize = 5;

/// Why a result block was skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionGap {
    #[error("result block has no header")]
    MissingHeader,

    #[error("header has {found} text nodes, need name and path")]
    IncompleteHeader { found: usize },

    #[error("result block has no synopsis")]
    MissingSynopsis,

    #[error("result block has no info label")]
    MissingInfoLabel,

    #[error("info label has {found} text nodes, need {needed}")]
    ShortInfoLabel { found: usize, needed: usize },
}

/// Extracts every well-formed record on a results page, in document order
///
/// Blocks that cannot be fully decoded are logged and skipped. An empty
/// result is not an error: the page may simply have no results.
pub fn extract_records(document: &Html) -> Vec<Record> {
    let blocks = find(document.tree.root(), Predicate::ClassEquals(SNIPPET_CLASS));
    let mut records = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.into_iter().enumerate() {
        match extract_record(block) {
            Ok(record) => records.push(record),
            Err(gap) => {
                tracing::debug!("Skipping result block {}: {}", index, gap);
            }
        }
    }

    records
}

/// Decodes a single result block
pub fn extract_record(block: NodeRef<'_>) -> Result<Record, ExtractionGap> {
    let header = find_first(block, Predicate::ClassEquals(HEADER_CLASS))
        .ok_or(ExtractionGap::MissingHeader)?;
    let header_texts = valid_texts(header);
    if header_texts.len() <= HEADER_PATH {
        return Err(ExtractionGap::IncompleteHeader {
            found: header_texts.len(),
        });
    }

    let synopsis = find_first(block, Predicate::ClassEquals(SYNOPSIS_CLASS))
        .ok_or(ExtractionGap::MissingSynopsis)?;
    let description = valid_texts(synopsis).first().copied().unwrap_or_default();

    let info = find_first(block, Predicate::ClassEquals(INFO_LABEL_CLASS))
        .ok_or(ExtractionGap::MissingInfoLabel)?;
    let info_texts = valid_texts(info);
    let needed = INFO_LICENSE + 1;
    if info_texts.len() < needed {
        return Err(ExtractionGap::ShortInfoLabel {
            found: info_texts.len(),
            needed,
        });
    }

    Ok(Record {
        repo: header_texts[HEADER_NAME].trim().to_string(),
        path: strip_path(header_texts[HEADER_PATH]).to_string(),
        description: description.trim().to_string(),
        version: info_texts[INFO_VERSION].trim().to_string(),
        published: info_texts[INFO_PUBLISHED].trim().to_string(),
        imported_by: info_texts[INFO_IMPORTED_BY].trim().to_string(),
        license: info_texts[INFO_LICENSE].trim().to_string(),
    })
}

/// The header renders the path as `(example.com/pkg)`
fn strip_path(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace())
}
