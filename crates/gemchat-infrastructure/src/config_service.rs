//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/gemchat/config.toml`.
//! A missing file yields the defaults.

use crate::paths::ChatPaths;
use gemchat_core::config::{ClientConfig, ConfigRoot};
use gemchat_core::{ChatError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ChatPaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the configuration file.
    pub fn load(&self) -> Result<ConfigRoot> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(ConfigRoot::default());
            }
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&content).map_err(|err| {
            ChatError::config(format!(
                "Failed to parse config file at {}: {err}",
                self.path.display()
            ))
        })
    }

    /// Convenience accessor for the `[client]` table.
    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(self.load()?.client)
    }
}
