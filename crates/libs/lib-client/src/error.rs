//! # Client Errors
//!
//! Every gateway call resolves to one of these. `Api` carries the gateway's
//! status and its `{ "message" }` text, so a UI can show the message as-is.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection refused, timeout, TLS failure...
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway answered with a non-success status.
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// A success body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// The session is missing or expired; the caller should log in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (404): Not found");
        assert!(!err.is_unauthorized());

        let err = ClientError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
    }
}
