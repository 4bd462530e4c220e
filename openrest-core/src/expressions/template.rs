use super::runtime::{parse_runtime_expr, ExpressionError, RuntimeExpr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Expr(RuntimeExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// A template without any expression segments.
    pub fn is_literal(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }
}

/// Splits `text {$vars.x} more` into literal and expression segments.
///
/// Braces not followed by `$` are kept verbatim so JSON-looking text passes through.
pub fn parse_template(input: &str) -> Result<Template, ExpressionError> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            buf.push(ch);
            continue;
        }

        let mut lookahead = chars.clone();
        while lookahead.peek().is_some_and(|c| c.is_whitespace()) {
            lookahead.next();
        }
        if lookahead.peek() != Some(&'$') {
            buf.push('{');
            continue;
        }

        let mut inner = String::new();
        let mut closed = false;
        for n in chars.by_ref() {
            if n == '}' {
                closed = true;
                break;
            }
            inner.push(n);
        }
        if !closed {
            return Err(ExpressionError::UnclosedExpression);
        }

        let expr = parse_runtime_expr(inner.trim())?;
        if !buf.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut buf)));
        }
        segments.push(Segment::Expr(expr));
    }

    if !buf.is_empty() {
        segments.push(Segment::Literal(buf));
    }

    Ok(Template { segments })
}
