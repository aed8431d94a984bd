use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::envelope::ErrorEnvelope;

/// Classification of every way a résumé request can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    EmptyInput,
    UnsupportedFormat,
    TooLarge,
    EmptyExtraction,
    LikelyScanned,
    TooShort,
    TooLong,
    UpstreamFailure,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "EMPTY_INPUT",
            ErrorKind::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorKind::TooLarge => "TOO_LARGE",
            ErrorKind::EmptyExtraction => "EMPTY_EXTRACTION",
            ErrorKind::LikelyScanned => "LIKELY_SCANNED",
            ErrorKind::TooShort => "TOO_SHORT",
            ErrorKind::TooLong => "TOO_LONG",
            ErrorKind::UpstreamFailure => "UPSTREAM_FAILURE",
        }
    }

    /// Validation kinds are the caller's fault; only upstream failures are ours.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::UpstreamFailure => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// A gate refused the input. Terminal for the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    pub kind: ErrorKind,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// A collaborator (parser or AI provider) failed. `message` is already
    /// shaped for the client (prefixed, and redacted when configured).
    #[error("Upstream failure: {message}")]
    Upstream { message: String },

    /// The request never reached the pipeline: malformed JSON, bad multipart, missing field.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Rejected(r) => Some(r.kind),
            AppError::Upstream { .. } => Some(ErrorKind::UpstreamFailure),
            AppError::BadRequest(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Transport errors sit outside the pipeline taxonomy.
        let (status, code) = match self.kind() {
            Some(kind) => (kind.status(), kind.code()),
            None => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };
        let message = match self {
            AppError::Rejected(r) => r.message,
            AppError::Upstream { message } => message,
            AppError::BadRequest(msg) => msg,
        };

        (status, Json(ErrorEnvelope::new(code, message))).into_response()
    }
}
