//! Configuration types.
//!
//! - `GenerationConfig`: sampling parameters sent with every request (fixed)
//! - `ClientConfig`: endpoint, model and timeout, read from `config.toml`
//! - `SecretConfig`: API keys, read from `secret.json`

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sampling parameters of the `generationConfig` request field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Randomness of sampling.
    pub temperature: f64,
    /// Nucleus sampling cutoff.
    pub top_p: f64,
    /// Size of the candidate pool.
    pub top_k: u32,
    /// Hard cap on reply length.
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// The parameters every request is sent with.
    pub const FIXED: GenerationConfig = GenerationConfig {
        temperature: 0.7,
        top_p: 0.8,
        top_k: 40,
        max_output_tokens: 2048,
    };
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ConfigRoot {
    #[serde(default)]
    pub client: ClientConfig,
}

/// Where and how the completion request is sent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full `generateContent` URL, without the key query parameter.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
///
/// Holds only the key; the model is chosen in `config.toml` or with `--model`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
}
