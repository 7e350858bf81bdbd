use super::NodeRef;
use scraper::Node;

/// Literal glyph the index renders between metadata fields
pub const SEPARATOR_GLYPH: &str = "|";

/// Structural test applied to each node during a tree search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'p> {
    /// Element carrying a `class` attribute whose whole value equals the name.
    /// Multi-class values are not split into tokens.
    ClassEquals(&'p str),

    /// Text node holding something other than whitespace or the separator glyph
    ValidText,
}

impl Predicate<'_> {
    /// Returns true if `node` satisfies this predicate
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        match (self, node.value()) {
            (Predicate::ClassEquals(name), Node::Element(element)) => element
                .attrs()
                .any(|(key, value)| key == "class" && value == *name),
            (Predicate::ValidText, Node::Text(text)) => is_valid_text(text),
            _ => false,
        }
    }
}

/// Returns true if a text payload carries data
pub fn is_valid_text(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed != SEPARATOR_GLYPH
}
