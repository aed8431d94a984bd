//! The one response shape every résumé endpoint returns.
//!
//! Success: `{ "success": true, "message": ..., <payload fields> }`
//! Failure: `{ "success": false, "error": ..., "code": ... }`

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub payload: T,
}

/// Nests a payload under `data`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    /// Payload fields are inlined next to `success` and `message`.
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload,
        }
    }
}

impl<T: Serialize> Envelope<Data<T>> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self::ok(message, Data { data })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

impl ErrorEnvelope {
    pub fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code,
        }
    }
}
