use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Unified API error, mapped onto HTTP responses with a `{"message": ...}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("User already exists")]
    DuplicateEmail,

    #[error("Authentication token is missing")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Asset not found or access denied")]
    NotFoundOrForbidden,

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::ExpiredToken
            | ApiError::UserNotFound
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Store failures are logged but never echoed to the client
        let message = match &self {
            ApiError::Database(e) => {
                error!(error = %e, "database error");
                "Internal server error".to_string()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}
