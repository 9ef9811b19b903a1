use tutor_core::model::{ProblemSession, SessionId};

use super::{SqliteRepository, mapping::map_session_row};
use crate::repository::{SessionRepository, StorageError};

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn insert_session(&self, session: &ProblemSession) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO problem_sessions (id, problem_text, correct_answer, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(session.id().to_string())
        .bind(session.problem_text().to_owned())
        .bind(session.correct_answer())
        .bind(session.created_at())
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

    async fn get_session(&self, id: SessionId) -> Result<ProblemSession, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, problem_text, correct_answer, created_at
            FROM problem_sessions
            WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_session_row(&row),
            None => Err(StorageError::NotFound),
        }
    }
}
