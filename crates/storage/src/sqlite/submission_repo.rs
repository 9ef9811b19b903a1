use tutor_core::model::{SessionId, Submission};

use super::{
    SqliteRepository,
    mapping::{encode_raw_answer, map_submission_row},
};
use crate::repository::{StorageError, SubmissionRepository};

#[async_trait::async_trait]
impl SubmissionRepository for SqliteRepository {
    async fn insert_submission(&self, submission: &Submission) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO problem_submissions (
                id, session_id, user_answer, is_correct, feedback_text, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(submission.id().to_string())
        .bind(submission.session_id().to_string())
        .bind(encode_raw_answer(submission.user_answer())?)
        .bind(submission.is_correct())
        .bind(submission.feedback_text().to_owned())
        .bind(submission.created_at())
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StorageError::Conflict)
            }
            Err(e) => Err(StorageError::Connection(e.to_string())),
        }
    }

    async fn list_submissions(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Submission>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, session_id, user_answer, is_correct, feedback_text, created_at
            FROM problem_submissions
            WHERE session_id = ?1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(session_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut submissions = Vec::with_capacity(rows.len());
        for row in rows {
            submissions.push(map_submission_row(&row)?);
        }
        Ok(submissions)
    }
}
