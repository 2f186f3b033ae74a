use std::sync::Arc;
use std::time::Duration;

use okta_browser::{Directory, DirectoryError, EntryId};
use tokio::sync::mpsc;

use crate::action::Action;

/// Upper bound on a single profile fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// An issued fetch: the entry it targets and its sequence number.
///
/// Sequence numbers increase monotonically; only the highest one issued is
/// ever applied to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub id: EntryId,
}

impl FetchRequest {
    /// The request that follows `last_seq` (0 when nothing was issued yet).
    pub fn after(last_seq: u64, id: EntryId) -> Self {
        Self {
            seq: last_seq + 1,
            id,
        }
    }
}

/// Why a profile fetch did not produce a record.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Runs profile fetches on background tasks and posts each outcome back to the
/// event loop as exactly one [`Action`].
pub struct ProfileFetcher {
    directory: Arc<dyn Directory>,
    tx: mpsc::Sender<Action>,
    timeout: Duration,
}

impl ProfileFetcher {
    pub fn new(
        directory: Arc<dyn Directory>,
        tx: mpsc::Sender<Action>,
        timeout: Duration,
    ) -> Self {
        Self {
            directory,
            tx,
            timeout,
        }
    }

    /// Start fetching `request.id` and return its sequence number right away.
    ///
    /// The fetch is never cancelled; a superseded result is still delivered
    /// and left for the app to discard.
    pub fn issue(&self, request: FetchRequest) -> u64 {
        let FetchRequest { seq, id } = request;
        let directory = Arc::clone(&self.directory);
        let tx = self.tx.clone();
        let timeout = self.timeout;

        tracing::debug!(seq, id = %id, "issuing profile fetch");

        tokio::spawn(async move {
            let action = match tokio::time::timeout(timeout, directory.get_profile(&id)).await {
                Ok(Ok(record)) => Action::FetchSucceeded(seq, Box::new(record)),
                Ok(Err(e)) => {
                    tracing::warn!(seq, id = %id, error = %e, "profile fetch failed");
                    Action::FetchFailed(seq, FetchError::Directory(e))
                }
                Err(_) => {
                    tracing::warn!(seq, id = %id, ?timeout, "profile fetch timed out");
                    Action::FetchFailed(seq, FetchError::Timeout(timeout))
                }
            };
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(action).await;
        });

        seq
    }
}

#[cfg(test)]
mod tests {
    use okta_browser::test_support::InMemoryDirectory;
    use okta_browser::{DirectoryEntry, FieldValue, ProfileRecord};

    use super::*;

    fn directory() -> Arc<dyn Directory> {
        let mut dir = InMemoryDirectory::new("test");
        dir.add(
            DirectoryEntry::new("alice"),
            ProfileRecord::from_fields([("login", FieldValue::text("alice"))]),
        );
        dir.add(
            DirectoryEntry::new("bob"),
            ProfileRecord::from_fields([("login", FieldValue::text("bob"))]),
        );
        dir.fail("bob", "connection reset");
        Arc::new(dir)
    }

    /// Never answers within any reasonable timeout.
    struct StalledDirectory;

    #[async_trait::async_trait]
    impl Directory for StalledDirectory {
        fn label(&self) -> &str {
            "stalled"
        }

        async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, DirectoryError> {
            Ok(vec![])
        }

        async fn get_profile(&self, _id: &EntryId) -> Result<ProfileRecord, DirectoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(DirectoryError::Other("unreachable".into()))
        }
    }

    #[test]
    fn requests_follow_the_last_sequence_number() {
        let first = FetchRequest::after(0, EntryId::new("a"));
        let second = FetchRequest::after(first.seq, EntryId::new("b"));
        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
    }

    #[tokio::test]
    async fn issue_returns_sequence_and_posts_success() {
        let (tx, mut rx) = mpsc::channel(4);
        let fetcher = ProfileFetcher::new(directory(), tx, DEFAULT_FETCH_TIMEOUT);

        let seq = fetcher.issue(FetchRequest::after(6, EntryId::new("alice")));
        assert_eq!(seq, 7);

        match rx.recv().await {
            Some(Action::FetchSucceeded(7, record)) => {
                assert_eq!(record.login.as_known(), Some("alice"));
            }
            other => panic!("expected FetchSucceeded(7, ..), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn directory_failure_posts_fetch_failed() {
        let (tx, mut rx) = mpsc::channel(4);
        let fetcher = ProfileFetcher::new(directory(), tx, DEFAULT_FETCH_TIMEOUT);

        fetcher.issue(FetchRequest::after(0, EntryId::new("bob")));

        match rx.recv().await {
            Some(Action::FetchFailed(1, FetchError::Directory(DirectoryError::Network(msg)))) => {
                assert_eq!(msg, "connection reset");
            }
            other => panic!("expected network failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_fetch_posts_timeout() {
        let (tx, mut rx) = mpsc::channel(4);
        let timeout = Duration::from_millis(20);
        let fetcher = ProfileFetcher::new(Arc::new(StalledDirectory), tx, timeout);

        fetcher.issue(FetchRequest::after(0, EntryId::new("alice")));

        match rx.recv().await {
            Some(Action::FetchFailed(1, FetchError::Timeout(t))) => assert_eq!(t, timeout),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn concurrent_fetches_each_post_one_result() {
        let (tx, mut rx) = mpsc::channel(4);
        let fetcher = ProfileFetcher::new(directory(), tx, DEFAULT_FETCH_TIMEOUT);

        fetcher.issue(FetchRequest::after(0, EntryId::new("alice")));
        fetcher.issue(FetchRequest::after(1, EntryId::new("ghost")));

        let mut seqs = Vec::new();
        for _ in 0..2 {
            match rx.recv().await {
                Some(Action::FetchSucceeded(seq, _)) | Some(Action::FetchFailed(seq, _)) => {
                    seqs.push(seq)
                }
                other => panic!("unexpected action {other:?}"),
            }
        }
        seqs.sort();
        assert_eq!(seqs, vec![1, 2]);
    }
}
