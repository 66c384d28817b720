//! Webhook failure taxonomy and its HTTP mapping.
//!
//! Every failure ends the request; nothing is retried. The caller only sees
//! a status code and a short JSON error, while details go to the log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use budget_ingest::StatementFormat;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body isn't JSON or lacks the callback URLs.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// Validation callback couldn't be reached or didn't answer with JSON.
    #[error("validation callback failed: {0}")]
    ValidationUnavailable(#[source] reqwest::Error),

    /// Validation callback answered `success: false`.
    #[error("webhook validation rejected")]
    Unauthorized,

    #[error("no attachments in webhook payload")]
    NoAttachments,

    /// Transport error or non-2xx from the attachment URL.
    #[error("failed to fetch attachment: {reason}")]
    FetchFailed { reason: String },

    #[error("unsupported attachment type: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("failed to parse {format} attachment: {reason}")]
    ParseFailed { format: StatementFormat, reason: String },
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidPayload(_)
            | WebhookError::NoAttachments
            | WebhookError::UnsupportedFormat { .. } => StatusCode::BAD_REQUEST,
            WebhookError::Unauthorized => StatusCode::FORBIDDEN,
            WebhookError::ValidationUnavailable(_) | WebhookError::FetchFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
            WebhookError::ParseFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            WebhookError::InvalidPayload(_) => "Invalid webhook payload",
            WebhookError::ValidationUnavailable(_) => "Validation callback failed",
            WebhookError::Unauthorized => "Not authorized",
            WebhookError::NoAttachments => "No attachments found",
            WebhookError::FetchFailed { .. } => "Failed to fetch attachment",
            WebhookError::UnsupportedFormat { .. } => "Unsupported attachment type",
            WebhookError::ParseFailed { .. } => "Failed to parse attachment",
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "webhook failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "webhook rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WebhookError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(WebhookError::NoAttachments.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            WebhookError::UnsupportedFormat { filename: "statement.pdf".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::FetchFailed { reason: "HTTP 404".into() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            WebhookError::ParseFailed { format: StatementFormat::Capitec, reason: "bad".into() }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_response_body_is_json_error() {
        let response = WebhookError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Not authorized" }));
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = WebhookError::UnsupportedFormat { filename: "statement.pdf".into() };
        assert_eq!(err.to_string(), "unsupported attachment type: statement.pdf");
    }
}
