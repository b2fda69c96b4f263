//! Session domain model.
//!
//! A `ChatSession` is created when the chat surface starts, handed by
//! `&mut` to every operation that changes the conversation, and dropped
//! when the surface exits. Nothing outlives it.

use super::transcript::Transcript;
use uuid::Uuid;

/// One interactive chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (RFC 3339 format)
    pub created_at: String,
    /// The conversation so far
    pub transcript: Transcript,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            transcript: Transcript::new(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = ChatSession::new();
        assert!(session.transcript.is_empty());
        assert!(!session.id.is_empty());
    }

    #[test]
    fn test_sessions_do_not_share_transcripts() {
        let mut a = ChatSession::new();
        let b = ChatSession::new();
        a.transcript
            .append(crate::session::Turn::user("only in a"))
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.transcript.len(), 1);
        assert!(b.transcript.is_empty());
    }
}
