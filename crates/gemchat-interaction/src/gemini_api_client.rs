//! CompletionClient - request assembly and reply extraction for the Gemini
//! `generateContent` API.
//!
//! The client maps a transcript to the wire format, hands the request to a
//! [`CompletionTransport`], and turns the outcome into an assistant [`Turn`].
//! Remote failures never escape [`CompletionClient::complete`]; they come
//! back as an assistant turn carrying the error text.

use gemchat_core::config::GenerationConfig;
use gemchat_core::session::{ChatSession, Turn, TurnRole};
use gemchat_core::{ChatError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::transport::CompletionTransport;

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// One role-tagged block of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

impl Content {
    fn text(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role: role.api_role().to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Option<Vec<PartResponse>>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

/// Builds the request for `new_user_text` on top of `history`.
///
/// Every prior turn is sent, in order, followed by the new user text.
pub fn build_request(history: &[Turn], new_user_text: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content::text(turn.role, turn.content.as_str()))
        .collect();
    contents.push(Content::text(TurnRole::User, new_user_text));

    GenerateContentRequest {
        contents,
        generation_config: GenerationConfig::FIXED,
    }
}

/// Extracts `candidates[0].content.parts[0].text` from a response body.
///
/// The text is returned verbatim.
pub fn extract_reply(body: &str) -> Result<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| ChatError::malformed(format!("Failed to parse Gemini response: {err}")))?;

    let candidate = parsed
        .candidates
        .ok_or_else(|| ChatError::malformed("Gemini response has no `candidates` field"))?
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::malformed("Gemini response has an empty `candidates` list"))?;

    let parts = candidate
        .content
        .ok_or_else(|| ChatError::malformed("Gemini response is missing `candidates[0].content`"))?
        .parts
        .ok_or_else(|| {
            ChatError::malformed("Gemini response is missing `candidates[0].content.parts`")
        })?;

    parts
        .into_iter()
        .next()
        .ok_or_else(|| {
            ChatError::malformed("Gemini response has an empty `candidates[0].content.parts` list")
        })?
        .text
        .ok_or_else(|| {
            ChatError::malformed("Gemini response is missing `candidates[0].content.parts[0].text`")
        })
}

/// Client that turns a transcript into one completion call.
pub struct CompletionClient<T> {
    transport: T,
}

impl<T: CompletionTransport> CompletionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `history` plus `new_user_text` and returns the reply text.
    pub async fn try_complete(&self, history: &[Turn], new_user_text: &str) -> Result<String> {
        let request = build_request(history, new_user_text);
        debug!(
            blocks = request.contents.len(),
            "sending generateContent request"
        );

        let body = self.transport.send(&request).await?;
        let reply = extract_reply(&body)?;
        info!(chars = reply.chars().count(), "received completion");
        Ok(reply)
    }

    /// Like [`try_complete`](Self::try_complete), but always yields an
    /// assistant turn. Failures are rendered into the turn content.
    pub async fn complete(&self, history: &[Turn], new_user_text: &str) -> Turn {
        match self.try_complete(history, new_user_text).await {
            Ok(reply) => Turn::assistant(reply),
            Err(err) => {
                warn!(error = %err, "completion failed");
                Turn::assistant(err.to_turn_content())
            }
        }
    }

    /// Runs one full exchange on `session`.
    ///
    /// Appends the user turn, completes against the turns that preceded it,
    /// and appends the reply (or error turn). Only a blank `text` is
    /// rejected; remote failures end up in the transcript.
    pub async fn submit<'s>(&self, session: &'s mut ChatSession, text: &str) -> Result<&'s Turn> {
        session.transcript.append(Turn::user(text))?;

        let reply = {
            let turns = session.transcript.all();
            let prior = &turns[..turns.len() - 1];
            self.complete(prior, text).await
        };

        session.transcript.append(reply)
    }
}
