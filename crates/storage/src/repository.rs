use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use tutor_core::model::{ProblemSession, SessionId, Submission, SubmissionId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for problem sessions.
///
/// Sessions are insert-once: there is no update or delete operation.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly generated session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id already exists, or other
    /// storage errors.
    async fn insert_session(&self, session: &ProblemSession) -> Result<(), StorageError>;

    /// Fetch a session by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_session(&self, id: SessionId) -> Result<ProblemSession, StorageError>;
}

/// Repository contract for submissions.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a graded submission.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_submission(&self, submission: &Submission) -> Result<(), StorageError>;

    /// All submissions recorded against a session, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on lookup failure. An unknown session yields
    /// an empty list, not `NotFound`.
    async fn list_submissions(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Submission>, StorageError>;
}

/// Aggregate of the repository handles a service layer needs.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
}

/// Mutex-map repository for tests and examples.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, ProblemSession>>>,
    submissions: Arc<Mutex<HashMap<SubmissionId, Submission>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap one repository instance as a `Storage` aggregate.
    #[must_use]
    pub fn into_storage(self) -> Storage {
        Storage {
            sessions: Arc::new(self.clone()),
            submissions: Arc::new(self),
        }
    }

    /// Number of stored sessions, for test assertions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Number of stored submissions, for test assertions.
    #[must_use]
    pub fn submission_count(&self) -> usize {
        self.submissions
            .lock()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn insert_session(&self, session: &ProblemSession) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&session.id()) {
            return Err(StorageError::Conflict);
        }
        guard.insert(session.id(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: SessionId) -> Result<ProblemSession, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryRepository {
    async fn insert_submission(&self, submission: &Submission) -> Result<(), StorageError> {
        let mut guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&submission.id()) {
            return Err(StorageError::Conflict);
        }
        guard.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn list_submissions(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Submission>, StorageError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<Submission> = guard
            .values()
            .filter(|s| s.session_id() == session_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }
}
