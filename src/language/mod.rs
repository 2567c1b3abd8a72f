// Types representing parsed template lines

mod config;
mod error;
mod types;

// Re-export all public symbols
pub use config::*;
pub use error::*;
pub use types::*;
