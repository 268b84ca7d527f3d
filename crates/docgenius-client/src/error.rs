use serde_json::Value;
use thiserror::Error;

/// User-facing message for requests that never reached the server
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please check your connection and try again.";

/// Fallback message when a failure carries no text of its own
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Every failure the client layer can produce
///
/// The request wrapper is the single point where transport, HTTP and decode
/// failures are normalized into one of these variants.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend base URL missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx response from the backend
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// Request never reached the server or the response never arrived
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    #[error("{}", unexpected_message(.0))]
    Unexpected(String),
}

impl ApiError {
    pub(crate) fn status_failure(status: u16) -> Self {
        ApiError::Http {
            status,
            message: status_message(status),
            details: None,
        }
    }

    /// Message suitable for showing to a person
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status code, present only for backend-reported failures
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured `details` payload from the error body, if any
    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Http { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network)
    }

    pub fn is_config(&self) -> bool {
        matches!(self, ApiError::Config(_))
    }
}

fn unexpected_message(message: &str) -> &str {
    if message.is_empty() {
        UNEXPECTED_ERROR_MESSAGE
    } else {
        message
    }
}

pub(crate) fn status_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}

pub type Result<T> = std::result::Result<T, ApiError>;
