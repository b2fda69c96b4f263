//! Secret service implementation.
//!
//! The API key is resolved in this order:
//! 1. the `GOOGLE_API_KEY` environment variable (a `.env` file in the
//!    working directory is loaded first)
//! 2. `gemini.api_key` in `~/.config/gemchat/secret.json`

use crate::paths::ChatPaths;
use gemchat_core::config::SecretConfig;
use gemchat_core::secret::SecretService;
use gemchat_core::{ChatError, Result};
use std::path::PathBuf;
use tracing::debug;

pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Service that resolves the Gemini API key from the environment or
/// `secret.json`.
#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    secret_path: PathBuf,
    env_var: String,
}

impl SecretServiceImpl {
    /// Creates a service backed by the default `secret.json` location.
    ///
    /// Loads `.env` from the working directory, if present, into the
    /// process environment.
    pub fn new() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env file");
        }
        Ok(Self::with_path(ChatPaths::secret_file()?))
    }

    /// Creates a service reading secrets from `secret_path`.
    pub fn with_path(secret_path: impl Into<PathBuf>) -> Self {
        Self {
            secret_path: secret_path.into(),
            env_var: API_KEY_ENV_VAR.to_string(),
        }
    }

    /// Overrides the environment variable the key is read from.
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    pub fn secret_path(&self) -> &PathBuf {
        &self.secret_path
    }
}

/// Picks the first non-blank key: environment value first, then secret file.
pub fn resolve_api_key(env_value: Option<String>, secrets: &SecretConfig) -> Option<String> {
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            secrets
                .gemini
                .as_ref()
                .map(|gemini| gemini.api_key.trim().to_string())
                .filter(|key| !key.is_empty())
        })
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        let content = match tokio::fs::read_to_string(&self.secret_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SecretConfig::default());
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&content).map_err(|err| {
            ChatError::config(format!(
                "Failed to parse secret file at {}: {err}",
                self.secret_path.display()
            ))
        })
    }

    async fn api_key(&self) -> Result<String> {
        self.api_key_with_env(std::env::var(&self.env_var).ok()).await
    }
}

impl SecretServiceImpl {
    /// Resolves the key from an already-read environment value.
    ///
    /// The secret file is only read when `env_value` is absent or blank, so
    /// a broken `secret.json` cannot shadow a key set in the environment.
    pub async fn api_key_with_env(&self, env_value: Option<String>) -> Result<String> {
        if let Some(key) = resolve_api_key(env_value, &SecretConfig::default()) {
            return Ok(key);
        }

        let secrets = self.load_secrets().await?;
        resolve_api_key(None, &secrets).ok_or_else(|| {
            ChatError::MissingCredential(format!(
                "{} was not found. Set it in the environment or a .env file \
                 ({}=your_api_key), or add {{\"gemini\": {{\"api_key\": \"...\"}}}} to {}",
                self.env_var,
                self.env_var,
                self.secret_path.display()
            ))
        })
    }
}
