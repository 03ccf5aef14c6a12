//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use protocol_core::QuizError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Quiz(QuizError::NotEnoughCards { .. }) => {
                (StatusCode::BAD_REQUEST, "not_enough_cards")
            }
            ApiError::Quiz(QuizError::EmptyPool) => (StatusCode::NOT_FOUND, "no_cards"),
        };

        tracing::debug!(error = %self, "request rejected");

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("card atropine__adult".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_quiz_error_status() {
        let error = ApiError::from(QuizError::NotEnoughCards {
            needed: 4,
            available: 2,
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_pool_status() {
        let response = ApiError::from(QuizError::EmptyPool).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ApiError::NotFound("Card adenosine__adult".to_string());
        assert_eq!(error.to_string(), "Not found: Card adenosine__adult");
    }

    #[test]
    fn test_error_display_quiz() {
        let error = ApiError::from(QuizError::NotEnoughCards {
            needed: 4,
            available: 3,
        });
        assert_eq!(
            error.to_string(),
            "Quiz error: need at least 4 distinct drugs for multiple choice, found 3"
        );
    }
}
