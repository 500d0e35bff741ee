//! Server error types with HTTP status code mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use graphwarden_intent::IntentError;
use serde::Serialize;
use thiserror::Error;

/// Server error type that wraps pipeline errors and provides HTTP status
/// mapping. The pipeline surfaces failures unmodified; translating them
/// into client-visible responses happens here and nowhere else.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline failure (upstream fetch or caller query execution)
    #[error("{0}")]
    Intent(#[from] IntentError),

    /// No query in the request (missing parameter, form field, and body)
    #[error("Missing query.")]
    MissingQuery,

    /// Generic bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not Acceptable (406) - content negotiation failure
    #[error("{0}")]
    NotAcceptable(String),
}

impl ServerError {
    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Caller faults
            ServerError::Intent(IntentError::QueryExecution(_)) => StatusCode::BAD_REQUEST,
            ServerError::MissingQuery => StatusCode::BAD_REQUEST,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,

            // Upstream faults: 504 when the bounded timeout elapsed,
            // 502 for everything else on the fetch path
            ServerError::Intent(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Intent(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,

            ServerError::Intent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServerError::BadRequest(msg.into())
    }

    /// Create a not acceptable error (406)
    pub fn not_acceptable(msg: impl Into<String>) -> Self {
        ServerError::NotAcceptable(msg.into())
    }
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error message (the failure detail, verbatim)
    pub error: String,
    /// HTTP status code
    pub status: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(r#"{{"error":"{}","status":{}}}"#, self, status.as_u16())
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;
