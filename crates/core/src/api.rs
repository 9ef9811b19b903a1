//! Wire contract shared by the HTTP server and the client UI.
//!
//! Field names here are the public API surface; changing them breaks
//! deployed clients.

use serde::{Deserialize, Serialize};

use crate::model::{ProblemSession, RawAnswer, SessionId, Submission, SubmissionId};

/// The session object returned by `POST /math-problem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBody {
    pub id: SessionId,
    pub problem_text: String,
    pub correct_answer: f64,
}

impl From<&ProblemSession> for SessionBody {
    fn from(session: &ProblemSession) -> Self {
        Self {
            id: session.id(),
            problem_text: session.problem_text().to_string(),
            correct_answer: session.correct_answer(),
        }
    }
}

/// The submission object returned by `POST /math-problem/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionBody {
    pub id: SubmissionId,
    pub session_id: SessionId,
    pub user_answer: RawAnswer,
    pub is_correct: bool,
    pub feedback_text: String,
}

impl From<&Submission> for SubmissionBody {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id(),
            session_id: submission.session_id(),
            user_answer: submission.user_answer().clone(),
            is_correct: submission.is_correct(),
            feedback_text: submission.feedback_text().to_string(),
        }
    }
}

/// Success envelope for `POST /math-problem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateProblemResponse {
    pub session: SessionBody,
}

/// Request body for `POST /math-problem/submit` as a well-formed client
/// sends it. The server side re-reads the same fields as optionals so it can
/// answer missing-field requests with its own validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub session_id: String,
    pub user_answer: RawAnswer,
}

/// Success envelope for `POST /math-problem/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub submission: SubmissionBody,
}

/// Error envelope used by every non-success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
