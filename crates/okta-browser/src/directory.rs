use std::sync::Arc;

use crate::entry::{DirectoryEntry, EntryId};
use crate::profile::ProfileRecord;

/// Errors that can occur when talking to an identity directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("user not found: {0}")]
    NotFound(EntryId),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

/// A remote directory of identity records.
///
/// Implementations list the available entries and fetch the full profile of
/// one entry on demand.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    /// Human-readable label identifying this directory (e.g. the org host).
    fn label(&self) -> &str;

    /// List every entry in the directory.
    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, DirectoryError>;

    /// Fetch the full profile for one entry.
    async fn get_profile(&self, id: &EntryId) -> Result<ProfileRecord, DirectoryError>;
}

#[async_trait::async_trait]
impl<T: Directory + ?Sized> Directory for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
        (**self).list_entries().await
    }

    async fn get_profile(&self, id: &EntryId) -> Result<ProfileRecord, DirectoryError> {
        (**self).get_profile(id).await
    }
}
