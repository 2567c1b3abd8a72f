use std::{fmt, path::Path};

use owo_colors::OwoColorize;

use crate::parsing::ParsingError;

/// A failure to parse, carrying enough of the original input to describe
/// where the problem is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError<'i> {
    pub problem: String,
    pub cause: ParsingError,
    pub source: &'i str,
    pub offset: usize,
}

impl<'i> SyntaxError<'i> {
    pub fn new(cause: ParsingError, source: &'i str) -> SyntaxError<'i> {
        SyntaxError {
            problem: cause.message(),
            offset: cause.offset(),
            cause,
            source,
        }
    }

    /// One-origin line and column of the problem, for display to humans.
    pub fn position(&self) -> (usize, usize) {
        let i = calculate_line_number(self.source, self.offset);
        let j = calculate_column_number(self.source, self.offset);
        (i + 1, j + 1)
    }

    // Verbose detailed explanation
    pub fn full_details(&self, filename: &Path) -> String {
        let i = calculate_line_number(self.source, self.offset);
        let (line, column) = self.position();

        let code = self
            .source
            .lines()
            .nth(i)
            .unwrap_or("");

        let width = line
            .to_string()
            .len();
        let width = 3.max(width);

        format!(
            r#"
{}: {}
{}:{}:{}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}
            "#,
            "error".bright_red(),
            self.problem
                .bold(),
            filename.to_string_lossy(),
            line,
            column,
            ' ',
            '|'.bright_blue(),
            line.bright_blue(),
            '|'.bright_blue(),
            code,
            ' ',
            '|'.bright_blue(),
            '^'.bright_red(),
        )
        .trim_ascii()
        .to_string()
    }
}

// Concise version for internal use
impl<'i> fmt::Display for SyntaxError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.position();

        write!(f, "{}:{}: {}", line, column, self.problem)
    }
}

impl<'i> std::error::Error for SyntaxError<'i> {}

// This returns a zero-origin result so that it can subsequently be used for
// splitting; for display to humans you'll have to add 1.
fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

// Calculate the column number, also zero-origin for consistency. Counted in
// characters, not bytes.
fn calculate_column_number(content: &str, offset: usize) -> usize {
    let before = &content[..offset];
    let start = match before.rfind('\n') {
        Some(i) => i + 1,
        None => 0,
    };
    before[start..]
        .chars()
        .count()
}
