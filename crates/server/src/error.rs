use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use services::ProblemServiceError;
use tutor_core::api::ErrorBody;

/// Error shape every handler returns: a status plus a JSON `{ "error" }`
/// body. Validation failures are the only client errors; everything else is
/// terminal for the request and maps to a 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn missing_fields() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Missing fields".into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ProblemServiceError> for ApiError {
    fn from(err: ProblemServiceError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::AiError;

    #[test]
    fn missing_fields_is_a_client_error() {
        let err = ApiError::missing_fields();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Missing fields");
    }

    #[test]
    fn service_failures_map_to_server_errors() {
        let err = ApiError::from(ProblemServiceError::Ai(AiError::NoOutput));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "ai returned no usable output");
    }
}
