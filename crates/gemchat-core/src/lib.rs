pub mod config;
pub mod error;
pub mod secret;
pub mod session;

// Re-export common error type
pub use error::{ChatError, ERROR_MARKER, Result};
