//! Response envelope returned by mutating REST calls

use crate::error::BookstoreError;
use serde::{Deserialize, Serialize};

/// Outcome of a catalog operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Success,
    Failed,
    NotFound,
    AlreadyExist,
    ValidationFailed,
}

impl ResultCode {
    /// Numeric code carried in the envelope
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failed => 1,
            Self::NotFound => 2,
            Self::AlreadyExist => 3,
            Self::ValidationFailed => 4,
        }
    }

    /// Symbolic name carried in the envelope
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExist => "ALREADY_EXIST",
            Self::ValidationFailed => "VALIDATION_FAILED",
        }
    }
}

/// JSON envelope: `{ "resultCode": 0, "resultText": "SUCCESS", "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub result_code: i32,
    pub result_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Message sent instead of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

impl BookResponse {
    /// Build an envelope for a result code
    pub fn new(code: ResultCode, message: Option<String>) -> Self {
        Self {
            result_code: code.code(),
            result_text: code.name().to_string(),
            message,
        }
    }

    pub fn success() -> Self {
        Self::new(ResultCode::Success, None)
    }

    /// Envelope for a failed operation; internal details are not echoed
    pub fn from_error(err: &BookstoreError) -> Self {
        let message = if err.is_client_facing() {
            err.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        };
        Self::new(err.result_code(), Some(message))
    }
}
