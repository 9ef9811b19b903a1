use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use tutor_core::api::{
    ErrorBody, GenerateProblemResponse, SessionBody, SubmissionBody, SubmitAnswerRequest,
    SubmitAnswerResponse,
};
use tutor_core::model::{RawAnswer, SessionId};

/// Errors surfaced to the view. `Server` carries the `{ "error" }` body the
/// service returned, verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Typed client for the tutor server's two endpoints.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /math-problem`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` with the service's error message on a
    /// non-success response, or `ApiError::Http` on transport failure.
    pub async fn generate_problem(&self) -> Result<SessionBody, ApiError> {
        let response = self
            .client
            .post(format!("{}/math-problem", self.base_url))
            .send()
            .await?;
        let body: GenerateProblemResponse = read_response(response).await?;
        Ok(body.session)
    }

    /// `POST /math-problem/submit`
    ///
    /// The answer is sent raw; the server does all coercion and grading.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` with the service's error message on a
    /// non-success response, or `ApiError::Http` on transport failure.
    pub async fn submit_answer(
        &self,
        session_id: SessionId,
        user_answer: RawAnswer,
    ) -> Result<SubmissionBody, ApiError> {
        let request = SubmitAnswerRequest {
            session_id: session_id.to_string(),
            user_answer,
        };
        let response = self
            .client
            .post(format!("{}/math-problem/submit", self.base_url))
            .json(&request)
            .send()
            .await?;
        let body: SubmitAnswerResponse = read_response(response).await?;
        Ok(body.submission)
    }
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    };
    Err(ApiError::Server(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:8080/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }
}
