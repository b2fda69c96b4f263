//! Conversation turn types.
//!
//! This module contains types for representing turns in a conversation,
//! including roles and turn content.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::ERROR_MARKER;

/// Display format of [`Turn::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents the role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Turn typed by the user.
    User,
    /// Reply from the model, or an error reported in its place.
    Assistant,
}

impl TurnRole {
    /// Returns the role name expected by the `generateContent` API.
    pub fn api_role(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "model",
        }
    }
}

/// A single turn in a conversation transcript.
///
/// The timestamp is informational only; position in the transcript
/// determines ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The role of the turn author.
    pub role: TurnRole,
    /// The text of the turn.
    pub content: String,
    /// Capture time formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl Turn {
    /// Creates a turn stamped with the current local time.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: now_timestamp(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// True for assistant turns that carry an error message instead of a reply.
    pub fn is_error(&self) -> bool {
        self.role == TurnRole::Assistant && self.content.starts_with(ERROR_MARKER)
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
