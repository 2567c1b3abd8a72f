//! Types representing the tokens produced by parsing a template line

use serde::Serialize;
use std::borrow::Cow;

/// A single name as written in the source. Operator names like `(:|)` are
/// held without their enclosing parenthesis.
#[derive(Clone, Copy, Eq, Debug, PartialEq, Serialize)]
pub struct Identifier<'i>(pub &'i str);

impl<'i> Identifier<'i> {
    /// Variable-shaped names are those whose first character is not
    /// uppercase; these are what can be bound by a pattern.
    pub fn is_variable(&self) -> bool {
        match self
            .0
            .chars()
            .next()
        {
            Some(c) => !c.is_uppercase() && !self.is_operator(),
            None => false,
        }
    }

    /// Constructor-shaped names start with an uppercase letter, or are a run
    /// of operator symbols.
    pub fn is_constructor(&self) -> bool {
        match self
            .0
            .chars()
            .next()
        {
            Some(c) => c.is_uppercase() || self.is_operator(),
            None => false,
        }
    }

    pub fn is_operator(&self) -> bool {
        !self
            .0
            .is_empty()
            && self
                .0
                .chars()
                .all(is_operator_symbol)
    }
}

/// Characters which can make up the alphanumeric form of an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Characters which can make up a parenthesized operator name.
pub fn is_operator_symbol(c: char) -> bool {
    matches!(
        c,
        '!' | '#'
            | '$'
            | '%'
            | '&'
            | '*'
            | '+'
            | '.'
            | '/'
            | '<'
            | '='
            | '>'
            | '?'
            | '@'
            | '\\'
            | '^'
            | '|'
            | '-'
            | '~'
            | ':'
    )
}

/// A reference to a constructor, optionally qualified by the path of the
/// module it comes from, as in `Data.Map.Map`.
#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub enum QualifiedName<'i> {
    Unqualified(Identifier<'i>),
    Qualified(Vec<Identifier<'i>>, Identifier<'i>),
}

// patterns as appear in forall and case directives

#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub enum Binding<'i> {
    Variable(Identifier<'i>),
    Alias(Identifier<'i>, Box<Binding<'i>>),
    Constructor(QualifiedName<'i>, Vec<Binding<'i>>),
    Record {
        constructor: QualifiedName<'i>,
        fields: Vec<Field<'i>>,
        wildcard: bool,
    },
    Tuple(Vec<Binding<'i>>),
    List(Vec<Binding<'i>>),
}

/// A single `label = binding` entry in a record pattern. A field written
/// without an `=` binds a variable of the same name as the field.
#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub struct Field<'i> {
    pub label: Identifier<'i>,
    pub binding: Binding<'i>,
}

impl<'i> Field<'i> {
    pub fn punned(label: Identifier<'i>) -> Field<'i> {
        Field {
            label,
            binding: Binding::Variable(label),
        }
    }

    pub fn is_punned(&self) -> bool {
        self.binding == Binding::Variable(self.label)
    }
}

// now the expressions used within interpolations and directives

#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub enum Expression<'i> {
    Variable(QualifiedName<'i>),
    Constructor(QualifiedName<'i>),
    Projection(Box<Expression<'i>>, Identifier<'i>),
    Application(Box<Expression<'i>>, Vec<Expression<'i>>),
    String(&'i str), // contents between the quotes, escapes left as written
    Integer(i64),
    Tuple(Vec<Expression<'i>>),
    List(Vec<Expression<'i>>),
    Unit,
}

// and finally the tokens making up a parsed line

#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub enum Content<'i> {
    Raw(Cow<'i, str>),
    Interpolated(Expression<'i>),
}

#[derive(Clone, Eq, Debug, PartialEq, Serialize)]
pub enum Control<'i> {
    ForallStart(Expression<'i>, Binding<'i>),
    ForallEnd,
    IfStart(Expression<'i>),
    ElseIf(Expression<'i>),
    Else,
    IfEnd,
    CaseStart(Expression<'i>),
    CaseOf(Binding<'i>),
    CaseEnd,
    Plain(Content<'i>),
}

impl<'i> Control<'i> {
    /// Is this one of the structural directives, as opposed to content?
    pub fn is_directive(&self) -> bool {
        !matches!(self, Control::Plain(_))
    }
}
