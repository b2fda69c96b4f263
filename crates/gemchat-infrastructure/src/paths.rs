//! Path management for gemchat configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/gemchat/
//! ├── config.toml     # Client configuration (model, endpoint, timeout)
//! └── secret.json     # API keys
//! ```

use gemchat_core::{ChatError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "gemchat";

pub struct ChatPaths;

impl ChatPaths {
    /// Returns the gemchat configuration directory (e.g., `~/.config/gemchat/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChatError::config("Cannot find home directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
