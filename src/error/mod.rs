//! Application error types for robust error handling.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Coarse error category, decides the status code and the `error` tag in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// Sorted, de-duplicated validation error.
    pub fn from_messages(mut messages: Vec<String>) -> Self {
        messages.sort();
        messages.dedup();
        AppError::Validation(messages)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Auth(_) | AppError::InvalidToken(_) => ErrorKind::Unauthorized,
            AppError::Db(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Field messages from a failed `validate()`, in no particular order.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::from_messages(validation_messages(&errors))
    }
}

/// A body that is not JSON of the expected shape is a validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let body = match &self {
            AppError::Validation(messages) => json!({
                "error": kind.tag(),
                "message": "Validation error",
                "errors": messages,
            }),
            AppError::NotFound(msg) | AppError::Auth(msg) => {
                json!({ "error": kind.tag(), "message": msg })
            }
            AppError::InvalidToken(reason) => {
                tracing::debug!(%reason, "token rejected");
                json!({ "error": kind.tag(), "message": "Invalid token" })
            }
            AppError::Db(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                json!({ "error": kind.tag(), "message": "Internal server error" })
            }
        };

        (kind.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
