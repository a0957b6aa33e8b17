pub mod calendar;
pub mod directory;
pub mod error;
pub mod money;

pub use directory::AgentDirectory;
pub use error::{AppError, Result};
