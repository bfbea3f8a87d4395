//! Error types for the myFlix client.

use serde_json::Value;
use thiserror::Error;

/// Message shown whenever the server gave nothing readable to show.
pub const FALLBACK_MESSAGE: &str = "Something went wrong; please try again later.";

/// Errors that can occur when talking to the myFlix API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connect, DNS, TLS, body read)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server rejected the request (4xx)
    #[error("Request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    /// The server failed to handle the request (5xx and anything else unexpected)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Failed to parse a successful response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid API base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing the local session failed
    #[error("Session storage error: {0}")]
    Session(String),
}

/// Discriminator for [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    Server,
    Parse,
    InvalidUrl,
    Session,
}

impl ClientError {
    /// Build the error for a non-success HTTP response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        if (400..500).contains(&status) {
            Self::Validation { status, message }
        } else {
            Self::Server { status, message }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Server { .. } => ErrorKind::Server,
            Self::Parse(_) => ErrorKind::Parse,
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::Session(_) => ErrorKind::Session,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message suitable for showing to the user.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Server { message, .. } => message.clone(),
            Self::Network { .. } | Self::Parse(_) => FALLBACK_MESSAGE.to_string(),
            Self::InvalidUrl(_) | Self::Session(_) => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Accepts a plain-text body, a JSON string, a JSON object with `message`,
/// or an express-validator style `{"errors": [{"msg": ...}]}` list.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Object(map) => {
            if let Some(Value::String(message)) = map.get("message") {
                return Some(message.clone());
            }
            let msgs: Vec<&str> = map
                .get("errors")
                .and_then(Value::as_array)
                .map(|errors| {
                    errors
                        .iter()
                        .filter_map(|e| e.get("msg").and_then(Value::as_str))
                        .collect()
                })
                .unwrap_or_default();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
