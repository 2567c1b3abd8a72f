//! Code formatter for template source

use crate::formatting::*;
use crate::language::*;

/// We do the code formatting in two passes. First we convert from the parsed
/// tokens into a Vec of "fragments" (Syntax tag, String pairs). Then second
/// we apply the specified renderer to each pair to result in an embellished
/// String.
pub fn render(renderer: &impl Render, config: &Config, tokens: &[Control]) -> String {
    let fragments = format_with_renderer(config, tokens);
    render_to_string(renderer, fragments)
}

/// Render a single pattern, as it would be written in a directive.
pub fn render_binding(renderer: &impl Render, binding: &Binding) -> String {
    let mut output = Formatter::new(Config::default());
    output.append_binding(binding);
    render_to_string(renderer, output.fragments)
}

/// Render a single expression, as it would be written in a directive.
pub fn render_expression(renderer: &impl Render, expression: &Expression) -> String {
    let mut output = Formatter::new(Config::default());
    output.append_expression(expression);
    render_to_string(renderer, output.fragments)
}

/// Pass 1: Convert tokens to semantic fragments. Each directive is put on
/// its own line; since directives absorb the newline following them the
/// result parses back to the same tokens.
pub fn format_with_renderer(config: &Config, tokens: &[Control]) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new(*config);

    for token in tokens {
        output.append_control(token);
    }

    output.fragments
}

/// Pass 2: apply markup to fragments via style() and combine.
fn render_to_string(renderer: &impl Render, fragments: Vec<(Syntax, String)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}

struct Formatter {
    config: Config,
    fragments: Vec<(Syntax, String)>,
}

impl Formatter {
    fn new(config: Config) -> Formatter {
        Formatter {
            config,
            fragments: Vec::new(),
        }
    }

    fn append(&mut self, syntax: Syntax, content: &str) {
        self.fragments
            .push((syntax, content.to_string()));
    }

    fn append_char(&mut self, syntax: Syntax, c: char) {
        self.fragments
            .push((syntax, c.to_string()));
    }

    fn append_control(&mut self, control: &Control) {
        match control {
            Control::ForallStart(expression, binding) => {
                self.open_directive("forall");
                self.append(Syntax::Neutral, " ");
                self.append_binding(binding);
                self.append(Syntax::Neutral, " ");
                self.append(Syntax::Operator, "<-");
                self.append(Syntax::Neutral, " ");
                self.append_expression(expression);
                self.close_directive();
            }
            Control::ForallEnd => {
                self.open_directive("endforall");
                self.close_directive();
            }
            Control::IfStart(expression) => {
                self.open_directive("if");
                self.append(Syntax::Neutral, " ");
                self.append_expression(expression);
                self.close_directive();
            }
            Control::ElseIf(expression) => {
                self.open_directive("elseif");
                self.append(Syntax::Neutral, " ");
                self.append_expression(expression);
                self.close_directive();
            }
            Control::Else => {
                self.open_directive("else");
                self.close_directive();
            }
            Control::IfEnd => {
                self.open_directive("endif");
                self.close_directive();
            }
            Control::CaseStart(expression) => {
                self.open_directive("case");
                self.append(Syntax::Neutral, " ");
                self.append_expression(expression);
                self.close_directive();
            }
            Control::CaseOf(binding) => {
                self.open_directive("of");
                self.append(Syntax::Neutral, " ");
                self.append_binding(binding);
                self.close_directive();
            }
            Control::CaseEnd => {
                self.open_directive("endcase");
                self.close_directive();
            }
            Control::Plain(Content::Raw(text)) => self.append_text(text),
            Control::Plain(Content::Interpolated(expression)) => {
                self.append_char(Syntax::Trigger, self.config.variable);
                self.append(Syntax::Structure, "{");
                self.append_expression(expression);
                self.append(Syntax::Structure, "}");
            }
        }
    }

    fn open_directive(&mut self, keyword: &str) {
        self.append_char(Syntax::Trigger, self.config.control);
        self.append(Syntax::Structure, "{");
        self.append(Syntax::Keyword, keyword);
    }

    fn close_directive(&mut self) {
        self.append(Syntax::Structure, "}");
        self.append(Syntax::Newline, "\n");
    }

    /// Literal text, with any trigger characters in it escaped.
    fn append_text(&mut self, text: &str) {
        let mut buffer = String::new();

        for c in text.chars() {
            if self
                .config
                .is_trigger(c)
            {
                if !buffer.is_empty() {
                    self.append(Syntax::Text, &buffer);
                    buffer.clear();
                }
                let mut escape = c.to_string();
                escape.push('\\');
                self.append(Syntax::Trigger, &escape);
            } else {
                buffer.push(c);
            }
        }

        if !buffer.is_empty() {
            self.append(Syntax::Text, &buffer);
        }
    }

    fn append_identifier(&mut self, syntax: Syntax, identifier: &Identifier) {
        if identifier.is_operator() {
            self.append(Syntax::Structure, "(");
            self.append(Syntax::Operator, identifier.0);
            self.append(Syntax::Structure, ")");
        } else {
            self.append(syntax, identifier.0);
        }
    }

    fn append_qualified(&mut self, syntax: Syntax, name: &QualifiedName) {
        match name {
            QualifiedName::Unqualified(name) => self.append_identifier(syntax, name),
            QualifiedName::Qualified(path, name) => {
                for segment in path {
                    self.append_identifier(Syntax::Constructor, segment);
                    self.append(Syntax::Neutral, ".");
                }
                self.append_identifier(syntax, name);
            }
        }
    }

    fn append_binding(&mut self, binding: &Binding) {
        match binding {
            Binding::Variable(name) => self.append_identifier(Syntax::Variable, name),
            Binding::Alias(name, inner) => {
                self.append_identifier(Syntax::Variable, name);
                self.append(Syntax::Operator, "@");
                self.append_atomic_binding(inner);
            }
            Binding::Constructor(constructor, parameters) => {
                self.append_qualified(Syntax::Constructor, constructor);
                for parameter in parameters {
                    self.append(Syntax::Neutral, " ");
                    self.append_atomic_binding(parameter);
                }
            }
            Binding::Record {
                constructor,
                fields,
                wildcard,
            } => {
                self.append_qualified(Syntax::Constructor, constructor);
                self.append(Syntax::Structure, "{");
                for (i, field) in fields
                    .iter()
                    .enumerate()
                {
                    if i > 0 {
                        self.append(Syntax::Structure, ",");
                        self.append(Syntax::Neutral, " ");
                    }
                    self.append_identifier(Syntax::Variable, &field.label);
                    if !field.is_punned() {
                        self.append(Syntax::Neutral, " ");
                        self.append(Syntax::Operator, "=");
                        self.append(Syntax::Neutral, " ");
                        self.append_binding(&field.binding);
                    }
                }
                if *wildcard {
                    if !fields.is_empty() {
                        self.append(Syntax::Structure, ",");
                        self.append(Syntax::Neutral, " ");
                    }
                    self.append(Syntax::Operator, "..");
                }
                self.append(Syntax::Structure, "}");
            }
            Binding::Tuple(elements) => {
                self.append(Syntax::Structure, "(");
                self.append_bindings(elements);
                self.append(Syntax::Structure, ")");
            }
            Binding::List(elements) => {
                self.append(Syntax::Structure, "[");
                self.append_bindings(elements);
                self.append(Syntax::Structure, "]");
            }
        }
    }

    /// Constructors applied to arguments need parenthesis when they appear
    /// as an argument or alias target themselves.
    fn append_atomic_binding(&mut self, binding: &Binding) {
        match binding {
            Binding::Constructor(_, parameters) if !parameters.is_empty() => {
                self.append(Syntax::Structure, "(");
                self.append_binding(binding);
                self.append(Syntax::Structure, ")");
            }
            _ => self.append_binding(binding),
        }
    }

    fn append_bindings(&mut self, bindings: &[Binding]) {
        for (i, binding) in bindings
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.append(Syntax::Structure, ",");
                self.append(Syntax::Neutral, " ");
            }
            self.append_binding(binding);
        }
    }

    fn append_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Variable(name) => self.append_qualified(Syntax::Variable, name),
            Expression::Constructor(name) => self.append_qualified(Syntax::Constructor, name),
            Expression::Projection(target, field) => {
                match target.as_ref() {
                    Expression::Application(_, _) | Expression::Constructor(_) => {
                        self.append(Syntax::Structure, "(");
                        self.append_expression(target);
                        self.append(Syntax::Structure, ")");
                    }
                    _ => self.append_expression(target),
                }
                self.append(Syntax::Neutral, ".");
                self.append_identifier(Syntax::Variable, field);
            }
            Expression::Application(function, arguments) => {
                self.append_argument(function);
                for argument in arguments {
                    self.append(Syntax::Neutral, " ");
                    self.append_argument(argument);
                }
            }
            Expression::String(text) => {
                self.append(Syntax::String, "\"");
                self.append(Syntax::String, text);
                self.append(Syntax::String, "\"");
            }
            Expression::Integer(value) => self.append(Syntax::Numeric, &value.to_string()),
            Expression::Tuple(elements) => {
                self.append(Syntax::Structure, "(");
                self.append_expressions(elements);
                self.append(Syntax::Structure, ")");
            }
            Expression::List(elements) => {
                self.append(Syntax::Structure, "[");
                self.append_expressions(elements);
                self.append(Syntax::Structure, "]");
            }
            Expression::Unit => self.append(Syntax::Structure, "()"),
        }
    }

    fn append_argument(&mut self, expression: &Expression) {
        match expression {
            Expression::Application(_, _) => {
                self.append(Syntax::Structure, "(");
                self.append_expression(expression);
                self.append(Syntax::Structure, ")");
            }
            _ => self.append_expression(expression),
        }
    }

    fn append_expressions(&mut self, expressions: &[Expression]) {
        for (i, expression) in expressions
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.append(Syntax::Structure, ",");
                self.append(Syntax::Neutral, " ");
            }
            self.append_expression(expression);
        }
    }
}
