use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::ai::{GeminiClient, ProblemAi};
use crate::error::AppServicesError;
use crate::problem_service::ProblemService;

/// Assembles the service layer from explicit collaborators.
#[derive(Clone)]
pub struct AppServices {
    problems: Arc<ProblemService>,
}

impl AppServices {
    /// Build services from an already-constructed storage aggregate and AI
    /// adapter. Nothing below this layer reads the environment.
    #[must_use]
    pub fn new(clock: Clock, ai: Arc<dyn ProblemAi>, storage: &Storage) -> Self {
        let problems = Arc::new(ProblemService::new(
            clock,
            ai,
            Arc::clone(&storage.sessions),
            Arc::clone(&storage.submissions),
        ));
        Self { problems }
    }

    /// Build services backed by `SQLite` storage and the env-configured
    /// Gemini adapter.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails. Missing
    /// AI credentials are not an error here; they surface per request.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let ai: Arc<dyn ProblemAi> = Arc::new(GeminiClient::from_env());
        Ok(Self::new(clock, ai, &storage))
    }

    #[must_use]
    pub fn problems(&self) -> Arc<ProblemService> {
        Arc::clone(&self.problems)
    }
}
