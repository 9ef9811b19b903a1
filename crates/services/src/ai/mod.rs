use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AiError;
use tutor_core::model::RawAnswer;

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};

/// Structured output of a generate-problem call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedProblem {
    pub problem_text: String,
    pub final_answer: f64,
}

/// Boundary for the external generative-AI endpoint.
#[async_trait]
pub trait ProblemAi: Send + Sync {
    /// Produce a single word problem with its numeric answer.
    ///
    /// # Errors
    ///
    /// Returns `AiError` when credentials are absent, the request fails, or
    /// the output cannot be parsed into a problem. Never retries.
    async fn generate_problem(&self) -> Result<GeneratedProblem, AiError>;

    /// Produce short plain-text feedback for a graded submission.
    ///
    /// The submitted value is passed raw, before numeric coercion, so the
    /// feedback can quote exactly what the student typed. An empty reply is
    /// an accepted outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns `AiError` when credentials are absent or the request fails.
    async fn generate_feedback(
        &self,
        problem_text: &str,
        correct_answer: f64,
        submitted: &RawAnswer,
    ) -> Result<String, AiError>;
}
