use std::borrow::Cow;

use crate::language::*;

/// Parse an entire line (or more, newlines are permitted in content) of
/// template source into the sequence of tokens it represents.
pub fn parse_via_scanning<'i>(
    config: &Config,
    content: &'i str,
) -> Result<Vec<Control<'i>>, ParsingError> {
    let mut input = Parser::new(*config);
    input.initialize(content);

    input.read_line()
}

/// Parse the entirety of the given text as a single pattern binding.
pub fn parse_binding<'i>(config: &Config, content: &'i str) -> Result<Binding<'i>, ParsingError> {
    let mut input = Parser::new(*config);
    input.initialize(content);

    input.trim_spaces();
    let binding = input.read_binding()?;
    input.ensure_finished()?;

    Ok(binding)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    IllegalParserState(usize),
    Expected(usize, &'static str),
    ExpectedCharacter(usize, char),
    ExpectedMatchingChar(usize, &'static str, char, char),
    UnexpectedEndOfInput(usize),
    InvalidIdentifier(usize, String),
    UnknownDirective(usize),
    InvalidExpression(usize),
    InvalidBinding(usize),
    InvalidRecord(usize),
    InvalidForall(usize),
    TooDeeplyNested(usize),
    TrailingInput(usize),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::IllegalParserState(offset) => *offset,
            ParsingError::Expected(offset, _) => *offset,
            ParsingError::ExpectedCharacter(offset, _) => *offset,
            ParsingError::ExpectedMatchingChar(offset, _, _, _) => *offset,
            ParsingError::UnexpectedEndOfInput(offset) => *offset,
            ParsingError::InvalidIdentifier(offset, _) => *offset,
            ParsingError::UnknownDirective(offset) => *offset,
            ParsingError::InvalidExpression(offset) => *offset,
            ParsingError::InvalidBinding(offset) => *offset,
            ParsingError::InvalidRecord(offset) => *offset,
            ParsingError::InvalidForall(offset) => *offset,
            ParsingError::TooDeeplyNested(offset) => *offset,
            ParsingError::TrailingInput(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::IllegalParserState(_) => "illegal parser state".to_string(),
            ParsingError::Expected(_, value) => format!("expected {}", value),
            ParsingError::ExpectedCharacter(_, c) => format!("expected '{}'", c),
            ParsingError::ExpectedMatchingChar(_, subject, start, end) => format!(
                "expected '{}' to close {} begun with '{}'",
                end, subject, start
            ),
            ParsingError::UnexpectedEndOfInput(_) => "unexpected end of input".to_string(),
            ParsingError::InvalidIdentifier(_, name) => format!("invalid identifier '{}'", name),
            ParsingError::UnknownDirective(_) => "unknown directive".to_string(),
            ParsingError::InvalidExpression(_) => "invalid expression".to_string(),
            ParsingError::InvalidBinding(_) => "invalid pattern".to_string(),
            ParsingError::InvalidRecord(_) => "invalid record pattern".to_string(),
            ParsingError::InvalidForall(_) => "invalid forall, expected '<-'".to_string(),
            ParsingError::TooDeeplyNested(_) => "pattern nested too deeply".to_string(),
            ParsingError::TrailingInput(_) => "unexpected trailing input".to_string(),
        }
    }
}

/// Nested patterns recurse; beyond this depth we give up rather than risk
/// exhausting the stack on hostile input.
pub(crate) const MAX_NESTING: usize = 64;

/// A single parsing function, used when trying several in turn.
pub(crate) type Alternative<'i, A> = fn(&mut Parser<'i>) -> Result<A, ParsingError>;

/// What a trigger character turned out to introduce.
#[derive(Debug, PartialEq)]
enum Statement<'i> {
    Literal(&'i str),
    Interpolation(Expression<'i>),
    Directive(Control<'i>),
}

#[derive(Debug, Clone)]
pub struct Parser<'i> {
    pub(crate) config: Config,
    pub(crate) source: &'i str,
    pub(crate) offset: usize,
    pub(crate) depth: usize,
}

impl<'i> Parser<'i> {
    pub fn new(config: Config) -> Parser<'i> {
        Parser {
            config,
            source: "",
            offset: 0,
            depth: 0,
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.source = content;
        self.offset = 0;
        self.depth = 0;
    }

    pub(crate) fn advance(&mut self, width: usize) {
        // advance the parser position
        self.source = &self.source[width..];
        self.offset += width;
    }

    pub(crate) fn entire(&self) -> &'i str {
        self.source
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.source
            .is_empty()
    }

    pub(crate) fn peek_next_char(&self) -> Option<char> {
        self.source
            .chars()
            .next()
    }

    pub(crate) fn ensure_finished(&self) -> Result<(), ParsingError> {
        if self.is_finished() {
            Ok(())
        } else {
            Err(ParsingError::TrailingInput(self.offset))
        }
    }

    /// Run the given parsing function, restoring the parser position if it
    /// fails so that an alternative can be tried from the same place.
    pub(crate) fn attempt<A, F>(&mut self, function: F) -> Result<A, ParsingError>
    where
        F: FnOnce(&mut Parser<'i>) -> Result<A, ParsingError>,
    {
        let source = self.source;
        let offset = self.offset;

        let result = function(self);

        if result.is_err() {
            self.source = source;
            self.offset = offset;
        }
        result
    }

    /// Try each alternative in order, returning the first to succeed. If
    /// none do, the error from whichever got furthest into the input is
    /// returned.
    pub(crate) fn choose<A>(
        &mut self,
        alternatives: &[Alternative<'i, A>],
    ) -> Result<A, ParsingError> {
        let mut furthest: Option<ParsingError> = None;

        for function in alternatives {
            match self.attempt(*function) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    furthest = match furthest {
                        Some(previous) if previous.offset() >= error.offset() => Some(previous),
                        _ => Some(error),
                    };
                }
            }
        }

        Err(furthest.unwrap_or(ParsingError::IllegalParserState(self.offset)))
    }

    /// Skip over spaces (only). This is the whitespace consumed after each
    /// structural token.
    pub(crate) fn trim_spaces(&mut self) {
        let content = self.entire();
        let l = content.len()
            - content
                .trim_start_matches(' ')
                .len();
        self.advance(l);
    }

    /// Skip over horizontal whitespace, that is spaces and tabs.
    pub(crate) fn trim_blanks(&mut self) {
        let content = self.entire();
        let l = content.len()
            - content
                .trim_start_matches([' ', '\t'])
                .len();
        self.advance(l);
    }

    /// Consume the given character or fail, leaving the position unchanged.
    pub(crate) fn require_char(&mut self, c: char) -> Result<(), ParsingError> {
        match self.peek_next_char() {
            Some(next) if next == c => {
                self.advance(c.len_utf8());
                Ok(())
            }
            Some(_) => Err(ParsingError::ExpectedCharacter(self.offset, c)),
            None => Err(ParsingError::UnexpectedEndOfInput(self.offset)),
        }
    }

    /// Consume a structural character and any spaces following it.
    pub(crate) fn take_token(&mut self, c: char) -> Result<(), ParsingError> {
        self.require_char(c)?;
        self.trim_spaces();
        Ok(())
    }

    /// Consume a directive keyword. The keyword must not run on into
    /// further identifier characters, so `if` does not match `iffy`.
    fn take_keyword(&mut self, keyword: &str) -> Result<(), ParsingError> {
        let content = self.entire();

        match content.strip_prefix(keyword) {
            Some(rest)
                if !rest
                    .chars()
                    .next()
                    .is_some_and(is_identifier_char) =>
            {
                self.advance(keyword.len());
                Ok(())
            }
            _ => Err(ParsingError::UnknownDirective(self.offset)),
        }
    }

    /// Directives swallow the line ending immediately following them so
    /// that a line holding only a directive leaves no blank line behind.
    fn take_newline(&mut self) {
        let content = self.entire();

        if content.starts_with("\r\n") {
            self.advance(2);
        } else if content.starts_with('\n') {
            self.advance(1);
        }
    }

    /// Scan the remaining input into tokens. Literal text, interpolations,
    /// and directives are recognized until the input is exhausted.
    pub fn read_line(&mut self) -> Result<Vec<Control<'i>>, ParsingError> {
        let mut tokens = Vec::new();

        while !self.is_finished() {
            let next = self.peek_next_char();

            let statement = if next == Some(self.config.variable) {
                self.read_interpolation()?
            } else if next == Some(self.config.control) {
                self.read_statement()?
            } else {
                Statement::Literal(self.read_plain()?)
            };

            match statement {
                Statement::Literal(text) => append_literal(&mut tokens, text),
                Statement::Interpolation(expression) => {
                    tokens.push(Control::Plain(Content::Interpolated(expression)))
                }
                Statement::Directive(control) => {
                    tokens.push(control);
                    self.take_newline();
                }
            }
        }

        self.ensure_finished()?;
        Ok(tokens)
    }

    /// Consume the longest run of text containing neither trigger.
    fn read_plain(&mut self) -> Result<&'i str, ParsingError> {
        let config = self.config;
        let content = self.entire();

        let width = content
            .find(|c: char| config.is_trigger(c))
            .unwrap_or(content.len());

        if width == 0 {
            return Err(ParsingError::IllegalParserState(self.offset));
        }

        let text = &content[..width];
        self.advance(width);
        Ok(text)
    }

    /// Having encountered the variable trigger, read either an escape, an
    /// interpolated expression in braces, or else just the trigger itself.
    fn read_interpolation(&mut self) -> Result<Statement<'i>, ParsingError> {
        let width = self
            .config
            .variable
            .len_utf8();
        let content = self.entire();
        let trigger = &content[..width];
        let rest = &content[width..];

        if rest.starts_with('\\') {
            self.advance(width + 1);
            Ok(Statement::Literal(trigger))
        } else if rest.starts_with('{') {
            self.advance(width + 1);
            self.trim_spaces();

            let expression = self.read_expression()?;

            self.trim_spaces();
            self.require_char('}')
                .map_err(|_| {
                    ParsingError::ExpectedMatchingChar(
                        self.offset,
                        "an interpolation",
                        '{',
                        '}',
                    )
                })?;

            Ok(Statement::Interpolation(expression))
        } else {
            self.advance(width);
            Ok(Statement::Literal(trigger))
        }
    }

    /// Having encountered the control trigger, read either an escape, a
    /// directive in braces, or else just the trigger itself.
    fn read_statement(&mut self) -> Result<Statement<'i>, ParsingError> {
        let width = self
            .config
            .control
            .len_utf8();
        let content = self.entire();
        let trigger = &content[..width];
        let rest = &content[width..];

        if rest.starts_with('\\') {
            self.advance(width + 1);
            Ok(Statement::Literal(trigger))
        } else if rest.starts_with('{') {
            self.advance(width + 1);
            self.trim_spaces();

            let control = self.read_directive()?;

            self.trim_spaces();
            self.require_char('}')
                .map_err(|_| {
                    ParsingError::ExpectedMatchingChar(self.offset, "a directive", '{', '}')
                })?;

            Ok(Statement::Directive(control))
        } else {
            self.advance(width);
            Ok(Statement::Literal(trigger))
        }
    }

    /// Read the keyword and payload of a directive, that is the part between
    /// the braces of `${...}`.
    pub fn read_directive(&mut self) -> Result<Control<'i>, ParsingError> {
        self.choose(&[
            Self::read_forall,
            Self::read_endforall,
            Self::read_if,
            Self::read_elseif,
            Self::read_else,
            Self::read_endif,
            Self::read_case,
            Self::read_of,
            Self::read_endcase,
        ])
    }

    fn read_forall(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("forall")?;
        self.trim_spaces();

        let binding = self.read_binding()?;

        if !self
            .entire()
            .starts_with("<-")
        {
            return Err(ParsingError::InvalidForall(self.offset));
        }
        self.advance(2);
        self.trim_spaces();

        let expression = self.read_expression()?;
        self.trim_blanks();

        Ok(Control::ForallStart(expression, binding))
    }

    fn read_endforall(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("endforall")?;
        Ok(Control::ForallEnd)
    }

    fn read_if(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("if")?;
        self.trim_spaces();

        let expression = self.read_expression()?;
        Ok(Control::IfStart(expression))
    }

    fn read_elseif(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("elseif")?;
        self.trim_spaces();

        let expression = self.read_expression()?;
        Ok(Control::ElseIf(expression))
    }

    fn read_else(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("else")?;
        Ok(Control::Else)
    }

    fn read_endif(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("endif")?;
        Ok(Control::IfEnd)
    }

    fn read_case(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("case")?;
        self.trim_spaces();

        let expression = self.read_expression()?;
        Ok(Control::CaseStart(expression))
    }

    fn read_of(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("of")?;
        self.trim_spaces();

        let binding = self.read_binding()?;
        Ok(Control::CaseOf(binding))
    }

    fn read_endcase(&mut self) -> Result<Control<'i>, ParsingError> {
        self.take_keyword("endcase")?;
        Ok(Control::CaseEnd)
    }
}

/// Add literal text to the token sequence, merging it into the preceding
/// token if that was also literal text.
fn append_literal<'i>(tokens: &mut Vec<Control<'i>>, text: &'i str) {
    if let Some(Control::Plain(Content::Raw(previous))) = tokens.last_mut() {
        previous
            .to_mut()
            .push_str(text);
    } else {
        tokens.push(Control::Plain(Content::Raw(Cow::Borrowed(text))));
    }
}
