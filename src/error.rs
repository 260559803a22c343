// SPDX-License-Identifier: MIT
//! API error taxonomy.
//!
//! Three failure classes cross the HTTP boundary:
//! - client input errors (empty code, missing fields, unknown model) -> 4xx
//! - upstream completion API failures -> 502 with the upstream error string
//! - optional-feature unavailability (OCR binary missing) -> clean 400
//!
//! Nothing here is fatal to the process. Handlers return `Result<_, ApiError>`
//! and the `IntoResponse` impl renders a uniform `{"error": "..."}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete client input. HTTP 400.
    #[error("{0}")]
    InvalidRequest(String),

    /// Credentials or token rejected. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Referenced resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// An optional capability is not installed on this host. HTTP 400.
    #[error("{0}")]
    FeatureUnavailable(String),

    /// The external completion API failed or is unreachable. HTTP 502.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::FeatureUnavailable(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = %status, err = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::FeatureUnavailable("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_message_includes_cause() {
        let e = ApiError::Upstream("connection refused".into());
        assert_eq!(e.to_string(), "upstream error: connection refused");
    }
}
