//! Secret management service trait.
//!
//! Defines the interface for resolving the API key used by the completion
//! client.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for managing secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secret files have appropriate permissions (e.g., 600 on Unix)
/// - Secrets are never logged or exposed in error messages
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration file.
    ///
    /// A missing file yields an empty `SecretConfig`, not an error.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Resolves the Gemini API key from every configured source.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the first non-empty key found
    /// - `Err(ChatError::MissingCredential)`: no source provided a key
    async fn api_key(&self) -> Result<String>;
}
