/**
 * Error Conversion
 *
 * `BackendError` implements `IntoResponse`, so handlers and middleware can return
 * it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Forbidden",
 *   "status": 403
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

/// Unparseable or non-JSON request bodies are client errors
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
