use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gemchat_core::session::{ChatSession, TurnRole};
use gemchat_core::{ChatError, ERROR_MARKER, Result};
use gemchat_interaction::{CompletionClient, CompletionTransport, GenerateContentRequest};

/// Transport that replays scripted outcomes and records every request.
struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedTransport {
    fn new(outcomes: Vec<Result<String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(reply_body(t))).collect())
    }

    fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn send(&self, request: &GenerateContentRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::transport("no scripted outcome left")))
    }
}

fn reply_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_n_submissions_yield_2n_turns() {
    let replies = ["one", "two", "three", "four"];
    let client = CompletionClient::new(ScriptedTransport::replying(&replies));
    let mut session = ChatSession::new();

    for i in 0..replies.len() {
        client
            .submit(&mut session, &format!("question {i}"))
            .await
            .expect("submit should succeed");
    }

    let turns = session.transcript.all();
    assert_eq!(turns.len(), 2 * replies.len());
    for (i, pair) in turns.chunks(2).enumerate() {
        assert_eq!(pair[0].role, TurnRole::User);
        assert_eq!(pair[0].content, format!("question {i}"));
        assert_eq!(pair[1].role, TurnRole::Assistant);
        assert_eq!(pair[1].content, replies[i]);
    }
}

#[tokio::test]
async fn test_full_history_sent_with_exact_roles() {
    let client = CompletionClient::new(ScriptedTransport::replying(&["a1", "a2"]));
    let mut session = ChatSession::new();

    client.submit(&mut session, "q1").await.unwrap();
    client.submit(&mut session, "q2").await.unwrap();

    // Third exchange is built against a 3-turn history plus the new text.
    let history = &session.transcript.all()[..3];
    let request = gemchat_interaction::build_request(history, "q3");
    let roles: Vec<&str> = request.contents.iter().map(|c| c.role.as_str()).collect();
    assert_eq!(roles, vec!["user", "model", "user", "user"]);

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].contents.len(), 1);
    assert_eq!(sent[1].contents.len(), 3);
    let texts: Vec<&str> = sent[1]
        .contents
        .iter()
        .map(|c| c.parts[0].text.as_str())
        .collect();
    assert_eq!(texts, vec!["q1", "a1", "q2"]);
}

#[tokio::test]
async fn test_hello_reply_is_taken_verbatim() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello!"}]}}]}"#;
    let client = CompletionClient::new(ScriptedTransport::new(vec![Ok(body.to_string())]));

    let turn = client.complete(&[], "hi").await;
    assert_eq!(turn.role, TurnRole::Assistant);
    assert_eq!(turn.content, "Hello!");
    assert!(!turn.is_error());
}

#[tokio::test]
async fn test_empty_candidates_become_error_turn() {
    let client = CompletionClient::new(ScriptedTransport::new(vec![Ok(
        r#"{"candidates":[]}"#.to_string(),
    )]));

    let turn = client.complete(&[], "hi").await;
    assert_eq!(turn.role, TurnRole::Assistant);
    assert!(turn.content.starts_with(ERROR_MARKER));
    assert!(turn.content.contains("candidates"));
}

#[tokio::test]
async fn test_timeout_keeps_transcript_consistent() {
    let client = CompletionClient::new(ScriptedTransport::new(vec![
        Ok(reply_body("fine")),
        Err(ChatError::transport(
            "Gemini API request timed out after 30s: operation timed out",
        )),
    ]));
    let mut session = ChatSession::new();

    client.submit(&mut session, "first").await.unwrap();
    let reply = client.submit(&mut session, "second").await.unwrap().clone();

    assert!(reply.is_error());
    assert!(reply.content.contains("timed out"));

    let turns = session.transcript.all();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[2].role, TurnRole::User);
    assert_eq!(turns[2].content, "second");
    assert_eq!(turns[3].role, TurnRole::Assistant);
}

#[tokio::test]
async fn test_error_turn_is_sent_back_as_model_context() {
    let client = CompletionClient::new(ScriptedTransport::new(vec![
        Err(ChatError::transport("connection refused")),
        Ok(reply_body("recovered")),
    ]));
    let mut session = ChatSession::new();

    client.submit(&mut session, "first").await.unwrap();
    client.submit(&mut session, "again").await.unwrap();

    let sent = client.transport().requests();
    assert_eq!(sent[1].contents[1].role, "model");
    assert!(sent[1].contents[1].parts[0].text.starts_with(ERROR_MARKER));
    assert_eq!(session.transcript.last().unwrap().content, "recovered");
}

#[tokio::test]
async fn test_clear_then_all_is_empty() {
    let client = CompletionClient::new(ScriptedTransport::replying(&["x", "y"]));
    let mut session = ChatSession::new();
    client.submit(&mut session, "a").await.unwrap();
    client.submit(&mut session, "b").await.unwrap();

    session.transcript.clear();
    assert!(session.transcript.all().is_empty());

    let first = session.transcript.all().to_vec();
    let second = session.transcript.all().to_vec();
    assert_eq!(first, second);
}
