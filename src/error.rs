use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

/// Every failure an announcements request can end in.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required for this action")]
    Unauthenticated,

    #[error("Invalid teacher credentials")]
    Unauthorized,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Announcement not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),

    /// Store round-trip failed. Details are logged, never sent to the client.
    #[error("Internal server error")]
    Store(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Store(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    if field == "__all__" {
                        message
                    } else {
                        format!("{field}: {message}")
                    }
                })
            })
            .collect();
        messages.sort();
        AppError::InvalidInput(messages.join("; "))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(e) => tracing::error!("store error: {e:#}"),
            AppError::Internal(msg) => tracing::error!("{msg}"),
            _ => {}
        }
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
