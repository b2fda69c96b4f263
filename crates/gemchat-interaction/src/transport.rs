//! Transport seam between the completion client and the network.
//!
//! [`HttpTransport`] posts to the real endpoint with reqwest; tests plug in
//! their own [`CompletionTransport`] to return canned bodies or failures.

use async_trait::async_trait;
use gemchat_core::config::ClientConfig;
use gemchat_core::{ChatError, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::gemini_api_client::GenerateContentRequest;

/// Delivers one request and returns the body of a 2xx response.
///
/// Implementations perform exactly one attempt; there is no retry.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(&self, request: &GenerateContentRequest) -> Result<String>;
}

/// Transport that calls the Gemini HTTP API.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport whose every call is bounded by `config.timeout()`.
    pub fn new(config: &ClientConfig, api_key: impl Into<String>) -> Result<Self> {
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ChatError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: api_key.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_request_error(&self, err: reqwest::Error) -> ChatError {
        // The URL carries the API key; keep it out of the message.
        let err = err.without_url();
        let detail = error_chain(&err);
        let message = if err.is_timeout() {
            format!(
                "Gemini API request timed out after {}s: {detail}",
                self.timeout.as_secs()
            )
        } else if err.is_connect() {
            format!("Failed to connect to Gemini API: {detail}")
        } else {
            format!("Gemini API request failed: {detail}")
        };
        ChatError::transport(message)
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(&self, request: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|err| self.map_request_error(err))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Gemini API responded");

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .text()
            .await
            .map_err(|err| self.map_request_error(err))
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Summarizes a non-2xx response, keeping the raw body as detail.
pub(crate) fn map_http_error(status: StatusCode, body: String) -> ChatError {
    let summary = serde_json::from_str::<ErrorWrapper>(&body)
        .ok()
        .and_then(|wrapper| {
            let msg = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(status_text) if !status_text.is_empty() => format!("{status_text}: {msg}"),
                _ => msg,
            })
        });

    let message = match summary {
        Some(summary) => format!("{status}: {summary}"),
        None => status.to_string(),
    };

    let body = Some(body).filter(|b| !b.trim().is_empty());
    ChatError::http_status(status.as_u16(), message, body)
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
