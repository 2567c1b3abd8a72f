pub mod error;
pub mod formatting;
pub mod language;
pub mod parsing;
