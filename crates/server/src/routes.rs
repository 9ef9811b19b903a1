use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use services::ProblemService;
use tutor_core::api::{
    GenerateProblemResponse, SessionBody, SubmissionBody, SubmitAnswerResponse,
};
use tutor_core::model::RawAnswer;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    problems: Arc<ProblemService>,
}

impl AppState {
    #[must_use]
    pub fn new(problems: Arc<ProblemService>) -> Self {
        Self { problems }
    }
}

#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/math-problem", post(generate_problem))
        .route("/math-problem/submit", post(submit_answer))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn generate_problem(
    State(state): State<AppState>,
) -> Result<Json<GenerateProblemResponse>, ApiError> {
    match state.problems.generate().await {
        Ok(session) => {
            info!(session_id = %session.id(), "generated problem session");
            Ok(Json(GenerateProblemResponse {
                session: SessionBody::from(&session),
            }))
        }
        Err(err) => {
            error!(error = %err, "problem generation failed");
            Err(ApiError::from(err))
        }
    }
}

/// Submit body read with optional fields so a request missing either one
/// gets the service's own validation error instead of an extractor
/// rejection.
#[derive(Debug, Deserialize)]
struct SubmitAnswerBody {
    session_id: Option<String>,
    user_answer: Option<RawAnswer>,
}

async fn submit_answer(
    State(state): State<AppState>,
    Json(body): Json<SubmitAnswerBody>,
) -> Result<Json<SubmitAnswerResponse>, ApiError> {
    let (Some(session_id), Some(user_answer)) = (body.session_id, body.user_answer) else {
        return Err(ApiError::missing_fields());
    };

    match state.problems.submit(&session_id, user_answer).await {
        Ok(submission) => {
            info!(
                submission_id = %submission.id(),
                session_id = %submission.session_id(),
                is_correct = submission.is_correct(),
                "recorded submission"
            );
            Ok(Json(SubmitAnswerResponse {
                submission: SubmissionBody::from(&submission),
            }))
        }
        Err(err) => {
            error!(error = %err, %session_id, "submission failed");
            Err(ApiError::from(err))
        }
    }
}
