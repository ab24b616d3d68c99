//! Failures a handler can report and how each one reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::structs::api::ErrorBody;
use crate::structs::person::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body")]
    MalformedInput,

    #[error("nickname already exists")]
    DuplicateNickname,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("person not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedInput | ApiError::DuplicateNickname | ApiError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Storage(error) => {
                tracing::error!(%error, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
