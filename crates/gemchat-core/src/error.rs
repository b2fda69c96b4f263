//! Error types for gemchat.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire gemchat workspace.
///
/// The two recoverable kinds (`Transport` and `MalformedResponse`) never
/// reach the user as a fault: the completion client turns them into an
/// assistant turn via [`ChatError::to_turn_content`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatError {
    /// No API key could be found in any configured source.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Network failure, timeout, or a non-2xx status from the remote API.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
        /// Raw response body, when the server sent one.
        body: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("{0}")]
    MalformedResponse(String),

    /// A turn was rejected by the transcript store.
    #[error("Invalid turn: {0}")]
    InvalidTurn(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },
}

/// Prefix carried by every assistant turn that reports a failure.
pub const ERROR_MARKER: &str = "❌";

impl ChatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error without a status code (timeout, connection).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Creates a Transport error for a non-2xx response.
    pub fn http_status(status: u16, message: impl Into<String>, body: Option<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
            body,
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a malformed response error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Check if this is a missing credential error
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }

    /// Renders the error as the content of an assistant turn.
    ///
    /// Transport errors include the response body as detail when one was
    /// received.
    pub fn to_turn_content(&self) -> String {
        match self {
            Self::Transport { message, body, .. } => {
                let mut content = format!("{ERROR_MARKER} API request error: {message}");
                if let Some(body) = body.as_deref().filter(|b| !b.trim().is_empty()) {
                    content.push_str("\nDetail: ");
                    content.push_str(body);
                }
                content
            }
            other => format!("{ERROR_MARKER} An error occurred: {other}"),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_content_includes_body() {
        let err = ChatError::http_status(
            400,
            "INVALID_ARGUMENT: API key not valid",
            Some(r#"{"error":{"code":400}}"#.to_string()),
        );
        let content = err.to_turn_content();

        assert!(content.starts_with(ERROR_MARKER));
        assert!(content.contains("API key not valid"));
        assert!(content.contains("\nDetail: {\"error\":{\"code\":400}}"));
    }

    #[test]
    fn test_transport_content_without_body() {
        let content = ChatError::transport("operation timed out").to_turn_content();
        assert_eq!(content, "❌ API request error: operation timed out");
    }

    #[test]
    fn test_malformed_content() {
        let content = ChatError::malformed("response has no candidates").to_turn_content();
        assert_eq!(content, "❌ An error occurred: response has no candidates");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ChatError = io.into();
        assert!(matches!(err, ChatError::Io { .. }));
        assert!(!err.is_transport());
    }
}
