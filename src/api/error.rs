//! API error handling for consistent JSON error responses.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use tracing::error;

use crate::mailer::MailError;
use crate::summarizer::SummarizeError;
use crate::upload::UploadError;

/// API error type that converts to JSON responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::MissingTranscript => Self::bad_request(err.to_string()),
            SummarizeError::EmptyCompletion => {
                Self::internal("Failed to generate summary").with_details(err.to_string())
            }
            SummarizeError::Provider(source) => {
                Self::internal("Failed to generate summary").with_details(format!("{:#}", source))
            }
        }
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::MissingRecipients | MailError::MissingSummary => {
                Self::bad_request(err.to_string())
            }
            MailError::Relay(source) => {
                Self::internal("Failed to send email").with_details(format!("{:#}", source))
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile => Self::bad_request(err.to_string()),
            UploadError::TooLarge { size, limit } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, err.to_string()).with_details(format!(
                    "{} bytes exceeds the {} byte limit",
                    size, limit
                ))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "Invalid request body").with_details(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(UploadError::MissingFile.to_string()).with_details(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "File too large"
        } else {
            "Failed to process file"
        };
        error!("Error processing file: {}", err.body_text());
        Self::new(status, message).with_details(err.body_text())
    }
}

/// Catch-all for panics raised while handling a request. Nothing about the
/// failure reaches the client.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Unhandled error: {}", detail);

    ApiError::internal("Internal server error").into_response()
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
