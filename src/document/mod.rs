//! Tree queries over parsed HTML documents
//!
//! This module provides a small structural query engine on top of the
//! `scraper` document tree:
//! - Predicate-driven search returning matches in document order
//! - Extraction of meaningful text leaves
//!
//! Queries never fail. A missing match is an empty result, and the caller
//! decides whether that is fatal.

mod predicate;

pub use predicate::{is_valid_text, Predicate, SEPARATOR_GLYPH};

use scraper::{Html, Node};

/// A borrowed node in a parsed document tree
pub type NodeRef<'a> = ego_tree::NodeRef<'a, Node>;

/// Parses a full HTML document
///
/// The HTML5 parser is error tolerant: malformed markup is repaired rather
/// than rejected, so this never fails.
pub fn parse_document(html: &str) -> Html {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::trace!("Parser recovered from {} markup errors", document.errors.len());
    }
    document
}

/// Finds all descendants of `root` matching `predicate`
///
/// Traversal is pre-order in document order: a node is tested before any of
/// its own descendants, and a node's whole subtree comes before its next
/// sibling. `root` itself is never tested. The Nth match is therefore the
/// Nth matching node in reading order, which positional extraction relies on.
pub fn find<'a>(root: NodeRef<'a>, predicate: Predicate<'_>) -> Vec<NodeRef<'a>> {
    root.descendants()
        .skip(1)
        .filter(|node| predicate.matches(*node))
        .collect()
}

/// Returns the first descendant of `root` matching `predicate`
pub fn find_first<'a>(root: NodeRef<'a>, predicate: Predicate<'_>) -> Option<NodeRef<'a>> {
    root.descendants()
        .skip(1)
        .find(|node| predicate.matches(*node))
}

/// Returns the payloads of all valid text leaves under `node`, in document order
///
/// Payloads are returned untrimmed.
pub fn valid_texts<'a>(node: NodeRef<'a>) -> Vec<&'a str> {
    find(node, Predicate::ValidText)
        .into_iter()
        .filter_map(|text_node| text_node.value().as_text().map(|text| &**text))
        .collect()
}
