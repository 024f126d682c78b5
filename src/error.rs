//! Relay boundary errors.
//!
//! Every failure is caught at the relay boundary and converted into a
//! well-formed JSON HTTP response with CORS headers, so browser callers can
//! always read error bodies. Non-2xx upstream statuses are not errors: they
//! are relayed verbatim so callers see the origin's exact payload.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Failures the relay converts into synthesized HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// No credential found in any request source or the configuration.
    #[error("no API credential supplied")]
    MissingCredential,

    /// Strict-mode format validation rejected the resolved credential.
    #[error("credential does not match the expected API key format")]
    InvalidCredentialFormat,

    /// Transport failure reaching the upstream: connect, DNS, TLS, or a
    /// broken read while buffering a body.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingCredential => StatusCode::UNAUTHORIZED,
            RelayError::InvalidCredentialFormat => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error as a JSON response, optionally exposing the raw
    /// transport error text for diagnostics.
    pub fn into_response_with(self, expose_upstream_errors: bool) -> Response {
        let status = self.status();
        let body = match &self {
            RelayError::MissingCredential => json!({
                "error": {
                    "code": status.as_u16(),
                    "message": "API credential required",
                    "accepted_sources": [
                        "query parameter `key`",
                        "`Authorization: Bearer` header",
                        "`x-api-key` header",
                        "`x-goog-api-key` header",
                        "`GEMINI_API_KEY` environment variable",
                    ],
                }
            }),
            RelayError::InvalidCredentialFormat => json!({
                "error": {
                    "code": status.as_u16(),
                    "message": self.to_string(),
                }
            }),
            RelayError::Upstream(err) => {
                let message = if expose_upstream_errors {
                    err.to_string()
                } else {
                    "upstream request failed".to_string()
                };
                json!({
                    "error": {
                        "code": status.as_u16(),
                        "message": message,
                    }
                })
            }
        };

        let mut response = (status, axum::Json(body)).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static("*"),
        );
        response
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
