//! Application error type mapping to HTTP status codes and the wire body.
//!
//! The wire contract is a flat `{"error": "..."}` body. The taxonomy is
//! deliberately coarse: missing fields (400), entitlement denied (403),
//! everything else (500, fixed message). Internal detail goes to the log,
//! never onto the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use polychat_types::error::{CheckoutError, ExchangeError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the chat exchange flow.
    Exchange(ExchangeError),
    /// Errors from direct repository access (history, feedback, clear).
    Repository(RepositoryError),
    /// Errors from the checkout collaborator.
    Checkout(CheckoutError),
    /// Validation error.
    Validation(String),
}

impl From<ExchangeError> for AppError {
    fn from(e: ExchangeError) -> Self {
        AppError::Exchange(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        AppError::Checkout(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Exchange(ExchangeError::MissingFields) => {
                (StatusCode::BAD_REQUEST, "Missing required fields".to_string())
            }
            AppError::Exchange(ExchangeError::EntitlementDenied) => (
                StatusCode::FORBIDDEN,
                "Premium subscription required for this model".to_string(),
            ),
            AppError::Exchange(e) => {
                error!(error = %e, "exchange failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                )
            }
            AppError::Repository(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "Message not found".to_string())
            }
            AppError::Repository(e) => {
                error!(error = %e, "repository operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                )
            }
            AppError::Checkout(CheckoutError::NotConfigured) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Checkout is not configured".to_string(),
            ),
            AppError::Checkout(e) => {
                error!(error = %e, "checkout failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create checkout session".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = json!({ "error": message });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
