/// One package entry found on a results page
///
/// Every field is trimmed. Fields whose markup is absent are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Package or repository name
    pub repo: String,

    /// Import path (may be empty)
    pub path: String,

    /// One-line synopsis (may be empty)
    pub description: String,

    /// Latest version label
    pub version: String,

    /// Publish date label, as rendered by the index
    pub published: String,

    /// "Imported by" count label, as rendered by the index
    pub imported_by: String,

    /// License label
    pub license: String,
}

impl Record {
    /// All fields in declaration order
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.repo,
            &self.path,
            &self.description,
            &self.version,
            &self.published,
            &self.imported_by,
            &self.license,
        ]
    }
}
