use sqlx::Row;
use tutor_core::model::{ProblemSession, RawAnswer, SessionId, Submission, SubmissionId};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn session_id_from_text(raw: &str) -> Result<SessionId, StorageError> {
    raw.parse::<SessionId>().map_err(ser)
}

pub(crate) fn submission_id_from_text(raw: &str) -> Result<SubmissionId, StorageError> {
    raw.parse::<SubmissionId>().map_err(ser)
}

/// The raw answer column holds the JSON encoding of the submitted value so
/// the string/number distinction survives a round trip.
pub(crate) fn encode_raw_answer(answer: &RawAnswer) -> Result<String, StorageError> {
    serde_json::to_string(answer).map_err(ser)
}

pub(crate) fn decode_raw_answer(raw: &str) -> Result<RawAnswer, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProblemSession, StorageError> {
    let id = session_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;
    let problem_text: String = row.try_get("problem_text").map_err(ser)?;
    let correct_answer: f64 = row.try_get("correct_answer").map_err(ser)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(ser)?;

    ProblemSession::from_persisted(id, problem_text, correct_answer, created_at).map_err(ser)
}

pub(crate) fn map_submission_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<Submission, StorageError> {
    let id = submission_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;
    let session_id = session_id_from_text(&row.try_get::<String, _>("session_id").map_err(ser)?)?;
    let user_answer = decode_raw_answer(&row.try_get::<String, _>("user_answer").map_err(ser)?)?;
    let is_correct: bool = row.try_get("is_correct").map_err(ser)?;
    let feedback_text: String = row.try_get("feedback_text").map_err(ser)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(ser)?;

    Ok(Submission::new(
        id,
        session_id,
        user_answer,
        is_correct,
        feedback_text,
        created_at,
    ))
}
