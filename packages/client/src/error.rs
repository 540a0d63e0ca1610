//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server URL could not be parsed
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Nickname is already used in the room
    #[error("Nickname '{nickname}' is already in use in room '{room}'")]
    NicknameTaken { nickname: String, room: String },

    /// Handshake refused for any other reason (empty or reserved nickname)
    #[error("Server rejected the connection with status {0}")]
    Rejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ClientError {
    /// Whether retrying the same connection can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_retryable() {
        assert!(ClientError::ConnectionError("reset".to_string()).is_retryable());
        assert!(!ClientError::Rejected(400).is_retryable());
        assert!(
            !ClientError::NicknameTaken {
                nickname: "alice".to_string(),
                room: "general".to_string(),
            }
            .is_retryable()
        );
    }
}
