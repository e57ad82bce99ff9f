// --- File: crates/slotbook_common/src/error.rs ---
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::cancel::Cancelled;

/// The base error type for all slotbook errors.
///
/// Each crate keeps its own error enum and implements `From<SpecificError> for SlotbookError`
/// so the binary can report everything through one type.
#[derive(Error, Debug)]
pub enum SlotbookError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input rejected before anything was sent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The backend answered with a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// The backend answered with a payload of the wrong shape
    #[error("Invalid data: {0}")]
    DataShapeError(String),

    /// The operation was abandoned because its view went away
    #[error("Cancelled")]
    CancelledError,

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Raw outcome of a failed backend call, before any display policy is applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received (connection refused, timeout, DNS, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A response arrived with a non-2xx status.
    #[error("backend returned status {status}")]
    Status {
        status: u16,
        detail: Option<ErrorDetail>,
    },

    /// A 2xx response whose body does not match the expected record shape.
    #[error("unexpected payload: {0}")]
    DataShape(String),
}

impl ApiError {
    /// The backend's own explanation, if it gave a usable one.
    pub fn detail_message(&self) -> Option<String> {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.message(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The `detail` member of a backend error body.
///
/// Handlers raise a plain string; request validation produces a list of field errors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}: {}", path, self.msg)
    }
}

impl ErrorDetail {
    /// Human-readable text, or `None` when the detail carries nothing to show.
    ///
    /// Field errors are rendered one per line as `path.to.field: message`.
    pub fn message(&self) -> Option<String> {
        let text = match self {
            ErrorDetail::Message(message) => message.clone(),
            ErrorDetail::Fields(fields) => fields
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for SlotbookError {
    fn from(err: reqwest::Error) -> Self {
        SlotbookError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for SlotbookError {
    fn from(err: serde_json::Error) -> Self {
        SlotbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SlotbookError {
    fn from(err: std::io::Error) -> Self {
        SlotbookError::InternalError(err.to_string())
    }
}

impl From<config::ConfigError> for SlotbookError {
    fn from(err: config::ConfigError) -> Self {
        SlotbookError::ConfigError(err.to_string())
    }
}

impl From<Cancelled> for SlotbookError {
    fn from(_: Cancelled) -> Self {
        SlotbookError::CancelledError
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::DataShape(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SlotbookError {
    SlotbookError::ConfigError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> SlotbookError {
    SlotbookError::InternalError(message.to_string())
}
