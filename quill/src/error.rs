use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM authentication failed: {0}")]
    LlmAuth(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },
}

impl IntoResponse for QuillError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            QuillError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            QuillError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            QuillError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            QuillError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            QuillError::LlmAuth(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            QuillError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            QuillError::LlmRateLimit { .. } => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (QuillError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (QuillError::Llm("boom".into()), StatusCode::BAD_GATEWAY),
            (QuillError::LlmAuth("key".into()), StatusCode::BAD_GATEWAY),
            (QuillError::LlmUnavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (
                QuillError::LlmRateLimit { retry_after: None },
                StatusCode::TOO_MANY_REQUESTS,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
