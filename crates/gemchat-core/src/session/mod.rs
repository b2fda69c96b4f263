//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Turn types (`TurnRole`, `Turn`)
//! - `transcript`: Ordered turn storage (`Transcript`)
//! - `model`: The owning session object (`ChatSession`)

mod message;
mod model;
mod transcript;

// Re-export public API
pub use message::{TIMESTAMP_FORMAT, Turn, TurnRole, now_timestamp};
pub use model::ChatSession;
pub use transcript::Transcript;
