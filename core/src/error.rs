//! Error types for the API client.
//!
//! # Design
//! Two outcomes reach a caller of `RequestClient::request`: the transport
//! never produced a response (`Network`, reported with status 0), or the
//! server answered with a non-2xx status (`Http`). `status()` and `body()`
//! give the flat `{status, body}` view regardless of variant.
//!
//! Turning a success payload into a concrete type is a separate step with
//! its own `DecodeError`, which carries no status.

use thiserror::Error;

use crate::types::ResponseBody;

/// Status reported for failures where no HTTP response was obtained.
pub const NETWORK_ERROR_STATUS: u16 = 0;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `RequestClient`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The transport failed before a complete response was read.
    #[error("network error: {message}")]
    Network { message: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: ResponseBody },
}

impl ApiError {
    /// HTTP status of the failure; `0` when no response was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Network { .. } => NETWORK_ERROR_STATUS,
        }
    }

    /// Error payload: the parsed JSON or raw text the server sent, or the
    /// stringified cause for network failures.
    pub fn body(&self) -> ResponseBody {
        match self {
            ApiError::Http { body, .. } => body.clone(),
            ApiError::Network { message } => ResponseBody::Text(message.clone()),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

/// A payload did not deserialize into the type requested by
/// `ResponseBody::into_json`.
#[derive(Debug, Error)]
#[error("decode failed: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Failure inside a `Transport` implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        TransportError::new(e.to_string())
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network { message: e.message }
    }
}

/// Errors from writing the token file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("token file is not a JSON object: {0}")]
    NotAnObject(String),
    #[error("could not determine config directory")]
    NoConfigDir,
}
