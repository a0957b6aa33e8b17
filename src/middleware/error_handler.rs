use actix_web::{error::JsonPayloadError, HttpRequest};

use crate::core::AppError;

/// Maps JSON extractor failures onto the API error envelope
///
/// Registered through `web::JsonConfig::error_handler` so malformed request
/// bodies produce the same `{"error": {...}}` shape as validation errors.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected request body");
    AppError::validation(format!("Invalid request body: {}", err)).into()
}
