//! Submission storage

use crate::models::{NewSubmission, StoredSubmission};
use async_trait::async_trait;
use dashmap::DashMap;

/// Repository result type
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    StorageError(String),
}

/// Submission repository
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Store a submission
    async fn insert(&self, submission: NewSubmission) -> RepoResult<StoredSubmission>;

    /// Submissions of one form, oldest first
    async fn list(&self, form_identifier: &str) -> RepoResult<Vec<StoredSubmission>>;

    /// Stored submissions across all forms
    async fn count(&self) -> RepoResult<usize>;
}

/// In-memory repository keyed by form identifier
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    submissions: DashMap<String, Vec<StoredSubmission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored submissions across all forms
    pub fn len(&self) -> usize {
        self.submissions.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: NewSubmission) -> RepoResult<StoredSubmission> {
        let stored = StoredSubmission::create(submission);
        self.submissions
            .entry(stored.form_identifier.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, form_identifier: &str) -> RepoResult<Vec<StoredSubmission>> {
        Ok(self
            .submissions
            .get(form_identifier)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.len())
    }
}
