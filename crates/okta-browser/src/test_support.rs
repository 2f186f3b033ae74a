use std::collections::HashMap;

use crate::{Directory, DirectoryEntry, DirectoryError, EntryId, ProfileRecord};

/// In-memory directory for testing. Entries list in insertion order.
pub struct InMemoryDirectory {
    label: String,
    entries: Vec<DirectoryEntry>,
    profiles: HashMap<EntryId, ProfileRecord>,
    failures: HashMap<EntryId, String>,
}

impl InMemoryDirectory {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
            profiles: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// Add an entry together with the profile returned for it.
    pub fn add(&mut self, entry: DirectoryEntry, profile: ProfileRecord) {
        self.profiles.insert(entry.id.clone(), profile);
        self.entries.push(entry);
    }

    /// Make `get_profile` for `id` fail with a network error.
    pub fn fail(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(EntryId::new(id), message.into());
    }
}

#[async_trait::async_trait]
impl Directory for InMemoryDirectory {
    fn label(&self) -> &str {
        &self.label
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        Ok(self.entries.clone())
    }

    async fn get_profile(&self, id: &EntryId) -> Result<ProfileRecord, DirectoryError> {
        if let Some(message) = self.failures.get(id) {
            return Err(DirectoryError::Network(message.clone()));
        }
        self.profiles
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))
    }
}
