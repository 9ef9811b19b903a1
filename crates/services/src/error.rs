//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use tutor_core::model::SessionError;

/// Errors emitted by the AI adapter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("ai credentials are not configured")]
    NotConfigured,
    #[error("ai returned no usable output")]
    NoOutput,
    #[error("ai output was not valid json")]
    InvalidJson,
    #[error("ai output is missing required fields")]
    MissingFields,
    #[error("ai request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `ProblemService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProblemServiceError {
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
