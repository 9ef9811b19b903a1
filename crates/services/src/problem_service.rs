use std::sync::Arc;

use storage::repository::{SessionRepository, SubmissionRepository};
use tutor_core::Clock;
use tutor_core::model::{ProblemSession, RawAnswer, SessionId, Submission, SubmissionId};

use crate::ai::ProblemAi;
use crate::error::ProblemServiceError;

/// Orchestrates the two operations of the service: generating a problem
/// session and grading a submission against one.
///
/// Each call performs at most one AI request and one or two store
/// operations, awaited in order; nothing is retried and no compensation
/// runs if a later step fails after an earlier one succeeded.
#[derive(Clone)]
pub struct ProblemService {
    clock: Clock,
    ai: Arc<dyn ProblemAi>,
    sessions: Arc<dyn SessionRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl ProblemService {
    #[must_use]
    pub fn new(
        clock: Clock,
        ai: Arc<dyn ProblemAi>,
        sessions: Arc<dyn SessionRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            clock,
            ai,
            sessions,
            submissions,
        }
    }

    /// Generate a fresh problem and persist it as a new session.
    ///
    /// # Errors
    ///
    /// Returns `ProblemServiceError` if the AI call fails, the generated
    /// content is invalid, or the insert fails.
    pub async fn generate(&self) -> Result<ProblemSession, ProblemServiceError> {
        let generated = self.ai.generate_problem().await?;
        let session = ProblemSession::new(
            SessionId::generate(),
            generated.problem_text,
            generated.final_answer,
            self.clock.now(),
        )?;
        self.sessions.insert_session(&session).await?;
        Ok(session)
    }

    /// Grade an answer against a stored session and persist the submission.
    ///
    /// The raw submitted value is kept as-is: grading coerces a copy, and
    /// the feedback prompt quotes the original.
    ///
    /// # Errors
    ///
    /// Returns `ProblemServiceError::InvalidSessionId` for an unparseable
    /// id, `StorageError::NotFound` for an unknown one, and propagates AI
    /// and insert failures. No submission row is written on any failure
    /// path.
    pub async fn submit(
        &self,
        session_id: &str,
        answer: RawAnswer,
    ) -> Result<Submission, ProblemServiceError> {
        let id: SessionId = session_id
            .parse()
            .map_err(|_| ProblemServiceError::InvalidSessionId(session_id.to_string()))?;
        let session = self.sessions.get_session(id).await?;

        let is_correct = session.check_answer(&answer);
        let feedback = self
            .ai
            .generate_feedback(session.problem_text(), session.correct_answer(), &answer)
            .await?;

        let submission = Submission::new(
            SubmissionId::generate(),
            session.id(),
            answer,
            is_correct,
            feedback,
            self.clock.now(),
        );
        self.submissions.insert_submission(&submission).await?;
        Ok(submission)
    }
}
