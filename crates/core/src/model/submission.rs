use chrono::{DateTime, Utc};

use crate::model::{RawAnswer, SessionId, SubmissionId};

/// One student attempt against a session.
///
/// Carries the answer exactly as submitted, the correctness derived at
/// creation time, and the AI feedback text (possibly empty). Immutable; a
/// session may accumulate any number of submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    id: SubmissionId,
    session_id: SessionId,
    user_answer: RawAnswer,
    is_correct: bool,
    feedback_text: String,
    created_at: DateTime<Utc>,
}

impl Submission {
    #[must_use]
    pub fn new(
        id: SubmissionId,
        session_id: SessionId,
        user_answer: RawAnswer,
        is_correct: bool,
        feedback_text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            user_answer,
            is_correct,
            feedback_text: feedback_text.into(),
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SubmissionId {
        self.id
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn user_answer(&self) -> &RawAnswer {
        &self.user_answer
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn feedback_text(&self) -> &str {
        &self.feedback_text
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
