//! Patterns, as bound by `forall` and matched by `of`.

use crate::language::*;

use super::parser::{Parser, ParsingError, MAX_NESTING};

impl<'i> Parser<'i> {
    /// Read a pattern. At the top level a constructor may be applied to
    /// arguments, as in `Just x`; anything else is a simple pattern.
    pub fn read_binding(&mut self) -> Result<Binding<'i>, ParsingError> {
        if self.depth >= MAX_NESTING {
            return Err(ParsingError::TooDeeplyNested(self.offset));
        }

        // once a constructor name is seen the bare alternative can only
        // succeed where the application does, so there is no need to parse
        // a nested record body twice over.
        self.depth += 1;
        let result = if self.starts_with_constructor() {
            self.attempt(Self::read_constructor_application)
        } else {
            self.read_atomic_binding()
        };
        self.depth -= 1;

        result
    }

    fn starts_with_constructor(&mut self) -> bool {
        let start = self.offset;
        let source = self.source;

        let found = self
            .read_constructor_name()
            .is_ok();

        self.source = source;
        self.offset = start;
        found
    }

    /// Read a pattern that needs no parenthesis to be used as an argument.
    fn read_atomic_binding(&mut self) -> Result<Binding<'i>, ParsingError> {
        self.choose(&[
            Self::read_variable_binding,
            Self::read_constructor_bare,
            Self::read_tuple_binding,
            Self::read_list_binding,
        ])
    }

    /// A variable, or an alias `name@pattern` binding a name to the whole of
    /// whatever the pattern after the `@` matches.
    fn read_variable_binding(&mut self) -> Result<Binding<'i>, ParsingError> {
        let start = self.offset;
        let name = self.read_identifier()?;

        if !name.is_variable() {
            return Err(ParsingError::InvalidIdentifier(start, name.0.to_string()));
        }

        if self.peek_next_char() == Some('@') {
            // alias chains recurse without passing through read_binding
            if self.depth >= MAX_NESTING {
                return Err(ParsingError::TooDeeplyNested(self.offset));
            }
            self.take_token('@')?;

            self.depth += 1;
            let inner = self.read_atomic_binding();
            self.depth -= 1;

            Ok(Binding::Alias(name, Box::new(inner?)))
        } else {
            Ok(Binding::Variable(name))
        }
    }

    fn read_constructor_application(&mut self) -> Result<Binding<'i>, ParsingError> {
        self.read_constructor_binding(true)
    }

    fn read_constructor_bare(&mut self) -> Result<Binding<'i>, ParsingError> {
        self.read_constructor_binding(false)
    }

    /// A constructor name followed by a record body in braces, or (if
    /// permitted) by argument patterns, or by nothing at all. A brace
    /// immediately after the name always begins a record pattern.
    fn read_constructor_binding(&mut self, arguments: bool) -> Result<Binding<'i>, ParsingError> {
        let constructor = self.read_qualified_name()?;

        if self.peek_next_char() == Some('{') {
            let (fields, wildcard) = self.read_record_body()?;
            return Ok(Binding::Record {
                constructor,
                fields,
                wildcard,
            });
        }

        let mut parameters = Vec::new();
        if arguments {
            while self
                .peek_next_char()
                .is_some_and(is_binding_start)
            {
                let parameter = self.read_atomic_binding()?;
                parameters.push(parameter);
            }
        }

        Ok(Binding::Constructor(constructor, parameters))
    }

    /// The braces and fields of a record pattern: `{..}`, `{}`, or a list of
    /// `label [= pattern]` separated by commas, optionally ending with `..`.
    fn read_record_body(&mut self) -> Result<(Vec<Field<'i>>, bool), ParsingError> {
        self.take_token('{')?;

        if self.take_wildcard() {
            self.close_record()?;
            return Ok((vec![], true));
        }

        let mut fields = Vec::new();

        if self.peek_next_char() == Some('}') {
            self.take_token('}')?;
            return Ok((fields, false));
        }

        loop {
            let field = self.read_field()?;
            fields.push(field);

            match self.peek_next_char() {
                Some(',') => {
                    self.take_token(',')?;
                    if self.take_wildcard() {
                        self.close_record()?;
                        return Ok((fields, true));
                    }
                }
                Some('}') => {
                    self.take_token('}')?;
                    return Ok((fields, false));
                }
                _ => {
                    return Err(ParsingError::ExpectedMatchingChar(
                        self.offset,
                        "a record pattern",
                        '{',
                        '}',
                    ))
                }
            }
        }
    }

    fn close_record(&mut self) -> Result<(), ParsingError> {
        self.take_token('}')
            .map_err(|_| {
                ParsingError::ExpectedMatchingChar(self.offset, "a record pattern", '{', '}')
            })
    }

    fn take_wildcard(&mut self) -> bool {
        if self
            .entire()
            .starts_with("..")
        {
            self.advance(2);
            self.trim_spaces();
            true
        } else {
            false
        }
    }

    fn read_field(&mut self) -> Result<Field<'i>, ParsingError> {
        let start = self.offset;
        let label = self
            .read_identifier()
            .map_err(|_| ParsingError::InvalidRecord(start))?;

        if !label.is_variable() {
            return Err(ParsingError::InvalidIdentifier(start, label.0.to_string()));
        }

        if self.peek_next_char() == Some('=') {
            self.take_token('=')?;
            let binding = self.read_binding()?;
            Ok(Field { label, binding })
        } else {
            Ok(Field::punned(label))
        }
    }

    /// Parenthesized patterns separated by commas. A single pattern in
    /// parenthesis is just that pattern, not a tuple of one.
    fn read_tuple_binding(&mut self) -> Result<Binding<'i>, ParsingError> {
        let start = self.offset;
        let mut elements = self.read_bindings('(', ')', "a tuple pattern")?;

        match elements.len() {
            0 => Err(ParsingError::InvalidBinding(start + 1)),
            1 => elements
                .pop()
                .ok_or(ParsingError::IllegalParserState(start)),
            _ => Ok(Binding::Tuple(elements)),
        }
    }

    fn read_list_binding(&mut self) -> Result<Binding<'i>, ParsingError> {
        let elements = self.read_bindings('[', ']', "a list pattern")?;
        Ok(Binding::List(elements))
    }

    fn read_bindings(
        &mut self,
        start: char,
        end: char,
        subject: &'static str,
    ) -> Result<Vec<Binding<'i>>, ParsingError> {
        self.take_token(start)?;

        let mut elements = Vec::new();

        if self.peek_next_char() == Some(end) {
            self.take_token(end)?;
            return Ok(elements);
        }

        loop {
            let binding = self.read_binding()?;
            elements.push(binding);

            match self.peek_next_char() {
                Some(',') => self.take_token(',')?,
                Some(c) if c == end => {
                    self.take_token(end)?;
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

    /// Read one or more constructor names separated by `.`, as in
    /// `Data.Map.Map`, with all but the last being the module path.
    pub(crate) fn read_qualified_name(&mut self) -> Result<QualifiedName<'i>, ParsingError> {
        let mut name = self.read_constructor_name()?;
        let mut path = Vec::new();

        while self.peek_next_char() == Some('.') {
            let next = self.attempt(|inner| {
                inner.advance(1);
                inner.read_constructor_name()
            });

            match next {
                Ok(segment) => {
                    path.push(name);
                    name = segment;
                }
                Err(_) => break,
            }
        }

        self.trim_spaces();

        if path.is_empty() {
            Ok(QualifiedName::Unqualified(name))
        } else {
            Ok(QualifiedName::Qualified(path, name))
        }
    }

    fn read_constructor_name(&mut self) -> Result<Identifier<'i>, ParsingError> {
        self.attempt(|inner| {
            let start = inner.offset;
            let name = inner.read_name()?;

            if name.is_constructor() {
                Ok(name)
            } else {
                Err(ParsingError::InvalidIdentifier(start, name.0.to_string()))
            }
        })
    }

    /// Consume an identifier and any spaces following it.
    fn read_identifier(&mut self) -> Result<Identifier<'i>, ParsingError> {
        let name = self.read_name()?;
        self.trim_spaces();
        Ok(name)
    }

    /// Consume a name: either a run of alphanumeric characters, or failing
    /// that a run of operator symbols enclosed in parenthesis like `(:|)`.
    pub(crate) fn read_name(&mut self) -> Result<Identifier<'i>, ParsingError> {
        let content = self.entire();

        let width = content
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(content.len());

        if width > 0 {
            self.advance(width);
            return Ok(Identifier(&content[..width]));
        }

        if let Some(rest) = content.strip_prefix('(') {
            let width = rest
                .find(|c: char| !is_operator_symbol(c))
                .unwrap_or(rest.len());

            if width > 0 && rest[width..].starts_with(')') {
                self.advance(width + 2);
                return Ok(Identifier(&rest[..width]));
            }
        }

        Err(ParsingError::Expected(self.offset, "an identifier"))
    }
}

/// Can a simple pattern begin with this character?
fn is_binding_start(c: char) -> bool {
    is_identifier_char(c) || c == '(' || c == '['
}
