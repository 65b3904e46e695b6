use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use livekit_api::access_token::AccessTokenError;

use crate::models::ErrorResponse;

pub const VALIDATION_MESSAGE: &str = "roomId and username are required";
pub const INTERNAL_MESSAGE: &str = "Failed to generate token";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("roomId and username are required")]
    Validation,

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation => (StatusCode::BAD_REQUEST, VALIDATION_MESSAGE),
            AppError::TokenSigning(detail) => {
                tracing::error!(error = %detail, "Error generating token");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
            AppError::InvalidToken(detail) => {
                tracing::debug!(error = %detail, "Token rejected");
                (StatusCode::UNAUTHORIZED, "Invalid token")
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<AccessTokenError> for AppError {
    fn from(err: AccessTokenError) -> Self {
        AppError::TokenSigning(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
