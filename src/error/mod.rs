// Errors as presented to the user

mod display;

// Re-export all public symbols
pub use display::*;
