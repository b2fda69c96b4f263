//! Ordered, append-only turn storage for one chat session.

use super::message::{Turn, TurnRole};
use crate::error::{ChatError, Result};

/// The ordered history of turns in a session.
///
/// Strict user/assistant alternation is not enforced: an error reply
/// followed by another user turn is stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end of the transcript.
    ///
    /// User turns must have non-blank content.
    pub fn append(&mut self, turn: Turn) -> Result<&Turn> {
        if turn.role == TurnRole::User && turn.content.trim().is_empty() {
            return Err(ChatError::InvalidTurn(
                "user turn content must not be empty".to_string(),
            ));
        }
        self.turns.push(turn);
        self.turns
            .last()
            .ok_or_else(|| ChatError::InvalidTurn("transcript empty after append".to_string()))
    }

    /// Removes every turn. Calling it on an empty transcript is a no-op.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Snapshot of the full ordered sequence.
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("first")).unwrap();
        transcript.append(Turn::assistant("second")).unwrap();
        transcript.append(Turn::user("third")).unwrap();

        let contents: Vec<&str> = transcript.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.last().unwrap().content, "third");
    }

    #[test]
    fn test_append_returns_stored_turn() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("question")).unwrap();

        let stored = transcript.append(Turn::assistant("answer")).unwrap().clone();
        assert_eq!(stored.role, TurnRole::Assistant);
        assert_eq!(stored.content, "answer");
        assert_eq!(transcript.last(), Some(&stored));
    }

    #[test]
    fn test_append_rejects_blank_user_turn() {
        let mut transcript = Transcript::new();
        let err = transcript.append(Turn::user("   ")).unwrap_err();
        assert!(matches!(err, ChatError::InvalidTurn(_)));
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_consecutive_same_role_turns_are_kept() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("hello")).unwrap();
        transcript.append(Turn::user("anyone there?")).unwrap();
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_clear_empties_and_is_idempotent() {
        let mut transcript = Transcript::new();
        for i in 0..5 {
            transcript.append(Turn::user(format!("msg {i}"))).unwrap();
        }

        transcript.clear();
        assert!(transcript.all().is_empty());

        transcript.clear();
        assert!(transcript.all().is_empty());
    }

    #[test]
    fn test_all_is_repeatable() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("a")).unwrap();
        transcript.append(Turn::assistant("b")).unwrap();

        let first = transcript.all().to_vec();
        let second = transcript.all().to_vec();
        assert_eq!(first, second);
    }
}
