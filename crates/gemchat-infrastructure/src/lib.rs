pub mod config_service;
pub mod paths;
pub mod secret_service;

pub use config_service::ConfigService;
pub use paths::ChatPaths;
pub use secret_service::{API_KEY_ENV_VAR, SecretServiceImpl};
