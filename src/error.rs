// Error handling module
// Defines the single error type every API call is normalized into

use serde_json::Value;
use thiserror::Error;

/// Message surfaced when the API gives us nothing better
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

/// Errors produced by the API gateway and the flows built on it
#[derive(Error, Debug)]
pub enum GatewayError {
    /// An authenticated call was requested while no credential is set
    #[error("Not logged in")]
    NotAuthenticated,

    /// The request never produced an HTTP response
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status; `message` is the server `detail` or the generic message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success response whose body is not JSON
    #[error("Invalid response from API: {0}")]
    Decode(String),

    /// Persisting or clearing the stored credential failed
    #[error("Credential storage error: {0}")]
    Credential(#[source] anyhow::Error),
}

impl GatewayError {
    /// Build an `Api` error from a raw error response body
    pub fn from_error_body(status: u16, body: &str) -> Self {
        GatewayError::Api {
            status,
            message: extract_detail(body).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }

    /// HTTP status of the failed call, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a string `detail` field out of an error envelope
///
/// Anything that is not a JSON object with a string `detail` yields `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let envelope: Value = serde_json::from_str(body).ok()?;
    envelope
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|d| d.to_string())
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
