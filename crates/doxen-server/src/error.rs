//! Error types for the HTTP server.

use std::net::AddrParseError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use doxen_core::TreeError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page not found at the given key.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Malformed `do` parameter or a component other than ours.
    #[error("Invalid signal request: {0}")]
    InvalidSignal(String),

    /// No listener answered the signal.
    #[error("Signal not handled: {0}")]
    UnhandledSignal(String),

    /// Document tree could not be loaded.
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Bind address could not be parsed.
    #[error("Invalid address: {0}")]
    Address(#[from] AddrParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking request task panicked or was cancelled.
    #[error("Request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
            Self::InvalidSignal(action) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid signal request", "do": action}),
            ),
            Self::UnhandledSignal(signal) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Signal not handled", "signal": signal}),
            ),
            Self::Tree(_) | Self::Address(_) | Self::Io(_) | Self::Task(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServerError::PageNotFound("x".to_owned()), StatusCode::NOT_FOUND),
            (ServerError::InvalidSignal("x".to_owned()), StatusCode::BAD_REQUEST),
            (ServerError::UnhandledSignal("x".to_owned()), StatusCode::NOT_FOUND),
            (
                ServerError::Io(std::io::Error::other("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
