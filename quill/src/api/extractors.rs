use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::QuillError;

/// `Json` extractor whose rejections render as [`QuillError`] bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(QuillError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for QuillError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> QuillError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                QuillError::Validation(format!("Missing required field: {field}"))
            } else {
                QuillError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            QuillError::Validation(format!("JSON syntax error: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => {
            QuillError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            QuillError::Internal("Failed to read request body".to_string())
        }
        _ => QuillError::Validation(rejection.to_string()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
