//! parser for template lines

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::SyntaxError;
use crate::language::{Binding, Config, Control, LoadingError};

mod expression;
pub mod parser;
mod pattern;

pub use parser::{Parser, ParsingError};

/// Read a file and return an owned String. We pass that ownership back to the
/// caller so that the tokens created by parse_line() below can borrow from
/// it. A filename of "-" reads from standard input.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    let result = if filename.to_str() == Some("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map(|_| content)
    } else {
        std::fs::read_to_string(filename)
    };

    match result {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into the sequence of tokens it represents, or return the
/// syntax error which prevented it. There is no partial result; a malformed
/// directive anywhere fails the whole parse.
pub fn parse_line<'i>(config: &Config, content: &'i str) -> Result<Vec<Control<'i>>, SyntaxError<'i>> {
    match parser::parse_via_scanning(config, content) {
        Ok(tokens) => {
            let directives = tokens
                .iter()
                .filter(|token| token.is_directive())
                .count();
            debug!(
                "Found {} token{}, {} directive{}",
                tokens.len(),
                if tokens.len() == 1 { "" } else { "s" },
                directives,
                if directives == 1 { "" } else { "s" }
            );
            Ok(tokens)
        }
        Err(error) => {
            debug!(?error);
            Err(SyntaxError::new(error, content))
        }
    }
}

/// Parse text which is expected to be a single pattern, in its entirety.
pub fn parse_pattern<'i>(config: &Config, content: &'i str) -> Result<Binding<'i>, SyntaxError<'i>> {
    parser::parse_binding(config, content).map_err(|error| {
        debug!(?error);
        SyntaxError::new(error, content)
    })
}
