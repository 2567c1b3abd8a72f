//! Expressions, as interpolated by `#{...}` and tested or iterated over by
//! directives. This is a deliberately small grammar: names, field
//! projection, application, and literals.

use crate::language::*;

use super::parser::{Parser, ParsingError, MAX_NESTING};

impl<'i> Parser<'i> {
    /// Read an expression. On failure the parser is left where it was.
    /// Trailing whitespace is only consumed if another argument follows it.
    pub fn read_expression(&mut self) -> Result<Expression<'i>, ParsingError> {
        if self.depth >= MAX_NESTING {
            return Err(ParsingError::TooDeeplyNested(self.offset));
        }

        self.depth += 1;
        let result = self.attempt(|outer| outer.read_application());
        self.depth -= 1;

        result
    }

    fn read_application(&mut self) -> Result<Expression<'i>, ParsingError> {
        let function = self.read_projection()?;
        let mut arguments = Vec::new();

        loop {
            let content = self.entire();
            let after = content.trim_start_matches([' ', '\t']);

            match after
                .chars()
                .next()
            {
                Some(c) if is_expression_start(c) => {
                    self.trim_blanks();
                    let argument = self.read_projection()?;
                    arguments.push(argument);
                }
                _ => break,
            }
        }

        if arguments.is_empty() {
            Ok(function)
        } else {
            Ok(Expression::Application(Box::new(function), arguments))
        }
    }

    /// An atom followed by any number of `.field` accesses.
    fn read_projection(&mut self) -> Result<Expression<'i>, ParsingError> {
        let mut expression = self.read_atom()?;

        while self
            .entire()
            .starts_with('.')
        {
            let field = self.attempt(|inner| {
                inner.advance(1);
                let start = inner.offset;
                let name = inner.read_name()?;
                if name.is_operator() {
                    return Err(ParsingError::InvalidIdentifier(start, name.0.to_string()));
                }
                Ok(name)
            });

            match field {
                Ok(name) => expression = Expression::Projection(Box::new(expression), name),
                Err(_) => break,
            }
        }

        Ok(expression)
    }

    fn read_atom(&mut self) -> Result<Expression<'i>, ParsingError> {
        match self.peek_next_char() {
            Some('"') => self.read_string(),
            Some('(') => self.read_parenthesized(),
            Some('[') => {
                let elements = self.read_expressions('[', ']', "a list")?;
                Ok(Expression::List(elements))
            }
            Some(c) if c.is_ascii_digit() => self.read_integer(),
            Some(c) if is_identifier_char(c) => self.read_reference(),
            _ => Err(ParsingError::InvalidExpression(self.offset)),
        }
    }

    /// A variable or constructor, possibly qualified. Leading constructor
    /// names form the module path; a variable-shaped name ends it, with any
    /// further dotted names being field projections.
    fn read_reference(&mut self) -> Result<Expression<'i>, ParsingError> {
        let start = self.offset;
        let mut name = self.read_name()?;

        if name.is_variable() {
            return Ok(Expression::Variable(QualifiedName::Unqualified(name)));
        }
        if !name.is_constructor() {
            return Err(ParsingError::InvalidIdentifier(start, name.0.to_string()));
        }

        let mut path = Vec::new();

        while self
            .entire()
            .starts_with('.')
        {
            let segment = self.attempt(|inner| {
                inner.advance(1);
                match inner.peek_next_char() {
                    Some(c) if is_identifier_char(c) => inner.read_name(),
                    _ => Err(ParsingError::Expected(inner.offset, "an identifier")),
                }
            });

            let segment = match segment {
                Ok(segment) => segment,
                Err(_) => break,
            };

            path.push(name);
            name = segment;

            if name.is_variable() {
                return Ok(Expression::Variable(qualify(path, name)));
            }
        }

        Ok(Expression::Constructor(qualify(path, name)))
    }

    fn read_parenthesized(&mut self) -> Result<Expression<'i>, ParsingError> {
        let start = self.offset;
        let mut elements = self.read_expressions('(', ')', "a parenthesized expression")?;

        match elements.len() {
            0 => Ok(Expression::Unit),
            1 => elements
                .pop()
                .ok_or(ParsingError::IllegalParserState(start)),
            _ => Ok(Expression::Tuple(elements)),
        }
    }

    fn read_expressions(
        &mut self,
        start: char,
        end: char,
        subject: &'static str,
    ) -> Result<Vec<Expression<'i>>, ParsingError> {
        self.require_char(start)?;
        self.trim_spaces();

        let mut elements = Vec::new();

        if self.peek_next_char() == Some(end) {
            self.advance(1);
            return Ok(elements);
        }

        loop {
            let expression = self.read_expression()?;
            elements.push(expression);
            self.trim_spaces();

            match self.peek_next_char() {
                Some(',') => {
                    self.advance(1);
                    self.trim_spaces();
                }
                Some(c) if c == end => {
                    self.advance(1);
                    return Ok(elements);
                }
                _ => {
                    return Err(ParsingError::ExpectedMatchingChar(
                        self.offset,
                        subject,
                        start,
                        end,
                    ))
                }
            }
        }
    }

    fn read_integer(&mut self) -> Result<Expression<'i>, ParsingError> {
        let content = self.entire();

        let width = content
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(content.len());

        // digits running on into letters, as in 1st, is not a number
        if content[width..]
            .chars()
            .next()
            .is_some_and(is_identifier_char)
        {
            return Err(ParsingError::InvalidExpression(self.offset));
        }

        let value = content[..width]
            .parse::<i64>()
            .map_err(|_| ParsingError::InvalidExpression(self.offset))?;

        self.advance(width);
        Ok(Expression::Integer(value))
    }

    /// A double quoted string. Backslash escapes the following character;
    /// the contents are kept as written.
    fn read_string(&mut self) -> Result<Expression<'i>, ParsingError> {
        let content = self.entire();
        let mut escaped = false;

        for (i, c) in content
            .char_indices()
            .skip(1)
        {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                let text = &content[1..i];
                self.advance(i + 1);
                return Ok(Expression::String(text));
            } else if c == '\n' {
                break;
            }
        }

        Err(ParsingError::ExpectedMatchingChar(
            self.offset,
            "a string literal",
            '"',
            '"',
        ))
    }
}

fn qualify<'i>(path: Vec<Identifier<'i>>, name: Identifier<'i>) -> QualifiedName<'i> {
    if path.is_empty() {
        QualifiedName::Unqualified(name)
    } else {
        QualifiedName::Qualified(path, name)
    }
}

/// Can an expression begin with this character?
fn is_expression_start(c: char) -> bool {
    is_identifier_char(c) || c == '(' || c == '[' || c == '"'
}
