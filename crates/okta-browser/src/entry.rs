use std::fmt;

/// Identifier the directory resolves a profile by (a login or handle).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the directory listing.
///
/// Entries are immutable once loaded. A reload replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: EntryId,
    pub label: Option<String>,
}

impl DirectoryEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(id),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Case-insensitive substring match against the id and the label.
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.id.as_str().to_lowercase().contains(query)
            || self
                .label
                .as_ref()
                .is_some_and(|l| l.to_lowercase().contains(query))
    }
}
