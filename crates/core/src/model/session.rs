use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{RawAnswer, SessionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("problem text is empty")]
    EmptyProblemText,

    #[error("correct answer must be a finite number")]
    NonFiniteAnswer,
}

/// A generated math problem together with its correct answer.
///
/// Sessions are created once, after a successful AI call, and are immutable
/// from then on.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSession {
    id: SessionId,
    problem_text: String,
    correct_answer: f64,
    created_at: DateTime<Utc>,
}

impl ProblemSession {
    /// Builds a new session from freshly generated problem content.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyProblemText` if the text is blank and
    /// `SessionError::NonFiniteAnswer` if the answer is NaN or infinite.
    pub fn new(
        id: SessionId,
        problem_text: impl Into<String>,
        correct_answer: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let problem_text = problem_text.into();
        if problem_text.trim().is_empty() {
            return Err(SessionError::EmptyProblemText);
        }
        if !correct_answer.is_finite() {
            return Err(SessionError::NonFiniteAnswer);
        }

        Ok(Self {
            id,
            problem_text,
            correct_answer,
            created_at,
        })
    }

    /// Rehydrate a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Applies the same validation as [`ProblemSession::new`]; stored rows
    /// that fail it are treated as corrupt.
    pub fn from_persisted(
        id: SessionId,
        problem_text: String,
        correct_answer: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        Self::new(id, problem_text, correct_answer, created_at)
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn problem_text(&self) -> &str {
        &self.problem_text
    }

    #[must_use]
    pub fn correct_answer(&self) -> f64 {
        self.correct_answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Grades a submitted answer: exact numeric equality after coercion.
    ///
    /// A value that does not coerce to a number is incorrect, never an error.
    #[must_use]
    pub fn check_answer(&self, answer: &RawAnswer) -> bool {
        answer
            .as_number()
            .is_some_and(|value| value == self.correct_answer)
    }
}
