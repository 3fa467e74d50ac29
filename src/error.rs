use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::{ApiResponse, FieldError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Validation error")]
    Validation(Vec<FieldError>),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("{action}: {message}")]
    Failed {
        action: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error: {0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn plant_not_found() -> Self {
        AppError::NotFound("Plant not found")
    }

    pub fn category_not_found() -> Self {
        AppError::NotFound("Category not found")
    }

    /// Label an unexpected failure with the operation that hit it.
    /// Client-facing errors pass through untouched.
    pub fn during(self, action: &'static str) -> Self {
        let message = match &self {
            AppError::DbError(err) => err.to_string(),
            AppError::OrmError(err) => err.to_string(),
            AppError::Internal(err) => err.to_string(),
            _ => return self,
        };
        AppError::Failed { action, message }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, ApiResponse::<()>::failure(what)),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Validation error").with_details(details),
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure("Bad Request").with_message(message),
            ),
            AppError::Failed { action, message } => {
                tracing::error!(error = %message, "{action}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(action).with_message(message),
                )
            }
            other => {
                tracing::error!(error = %other, "unhandled error");
                let message = match &other {
                    AppError::DbError(err) => err.to_string(),
                    AppError::OrmError(err) => err.to_string(),
                    AppError::Internal(err) => err.to_string(),
                    _ => other.to_string(),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure("Internal Server Error").with_message(message),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn during_labels_only_unexpected_errors() {
        let labelled = AppError::Internal(anyhow::anyhow!("connection refused"))
            .during("Failed to fetch plants");
        match labelled {
            AppError::Failed { action, message } => {
                assert_eq!(action, "Failed to fetch plants");
                assert_eq!(message, "connection refused");
            }
            other => panic!("unexpected {other:?}"),
        }

        let untouched = AppError::plant_not_found().during("Failed to fetch plant");
        assert!(matches!(untouched, AppError::NotFound("Plant not found")));
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            AppError::plant_not_found().into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom"))
                .during("Failed to create plant")
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
