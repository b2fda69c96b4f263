//! Completion client for the Gemini `generateContent` API.

pub mod gemini_api_client;
pub mod transport;

pub use gemini_api_client::{
    CompletionClient, Content, GenerateContentRequest, Part, build_request, extract_reply,
};
pub use transport::{CompletionTransport, HttpTransport};
