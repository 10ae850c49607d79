use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {0}: {1}")]
    Io(String, #[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Completion API returned {0}: {1}")]
    Status(u16, String),
    #[error("Completion response contained no content")]
    EmptyResponse,
    #[error("Model did not return a valid plan")]
    InvalidPlan,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Data store is not configured")]
    NotConfigured,
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store returned {0}: {1}")]
    Status(u16, String),
    #[error("Unexpected store response: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Llm(_) | AppError::Store(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::Dataset(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
