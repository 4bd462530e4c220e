use std::sync::LazyLock;

use regex::Regex;

use super::json_pointer::{JsonPointer, JsonPointerError};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{Nd}\-_]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeExpr {
    Vars(NamePath),
    Env(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePath {
    pub root: String,
    pub rest: Vec<String>,
    pub pointer: Option<JsonPointer>,
}

pub fn parse_runtime_expr(input: &str) -> Result<RuntimeExpr, ExpressionError> {
    let s = input.trim();
    let Some(body) = s.strip_prefix('$') else {
        return Err(ExpressionError::MissingDollarPrefix);
    };

    let (head, pointer) = match body.split_once('#') {
        Some((head, frag)) => (head, Some(JsonPointer::parse(frag)?)),
        None => (body, None),
    };

    if let Some(rest) = head.strip_prefix("vars.") {
        return Ok(RuntimeExpr::Vars(parse_name_path(rest, pointer)?));
    }
    if let Some(name) = head.strip_prefix("env.") {
        if pointer.is_some() {
            return Err(ExpressionError::PointerNotAllowed);
        }
        validate_name(name)?;
        return Ok(RuntimeExpr::Env(name.to_string()));
    }

    Err(ExpressionError::UnknownExpression(head.to_string()))
}

fn parse_name_path(rest: &str, pointer: Option<JsonPointer>) -> Result<NamePath, ExpressionError> {
    let mut parts = rest.split('.');
    let root = parts.next().unwrap_or_default();
    validate_name(root)?;

    let mut remaining = Vec::new();
    for p in parts {
        validate_name(p)?;
        remaining.push(p.to_string());
    }

    Ok(NamePath {
        root: root.to_string(),
        rest: remaining,
        pointer,
    })
}

fn validate_name(name: &str) -> Result<(), ExpressionError> {
    if name.is_empty() {
        return Err(ExpressionError::EmptyName);
    }
    if !NAME_RE.is_match(name) {
        return Err(ExpressionError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("runtime expression must start with '$'")]
    MissingDollarPrefix,
    #[error("unknown runtime expression: {0}")]
    UnknownExpression(String),
    #[error("name segment must not be empty")]
    EmptyName,
    #[error("invalid name segment: {0}")]
    InvalidName(String),
    #[error("invalid json pointer: {0}")]
    InvalidJsonPointer(#[from] JsonPointerError),
    #[error("json pointer is not allowed on this runtime expression")]
    PointerNotAllowed,
    #[error("unclosed embedded expression (missing '}}')")]
    UnclosedExpression,
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("environment variable not set: {0}")]
    UndefinedEnv(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variable_with_fields_and_pointer() {
        let expr = parse_runtime_expr("$vars.user.address#/city").unwrap();
        let RuntimeExpr::Vars(np) = expr else {
            panic!("expected vars expression");
        };
        assert_eq!(np.root, "user");
        assert_eq!(np.rest, vec!["address".to_string()]);
        assert_eq!(np.pointer.unwrap().as_str(), "/city");
    }

    #[test]
    fn env_does_not_take_pointer() {
        assert_eq!(
            parse_runtime_expr("$env.TOKEN#/x"),
            Err(ExpressionError::PointerNotAllowed)
        );
        assert_eq!(
            parse_runtime_expr("$env.TOKEN"),
            Ok(RuntimeExpr::Env("TOKEN".into()))
        );
    }

    #[test]
    fn rejects_unknown_roots_and_empty_segments() {
        assert!(matches!(
            parse_runtime_expr("$steps.a"),
            Err(ExpressionError::UnknownExpression(_))
        ));
        assert_eq!(parse_runtime_expr("$vars.a..b"), Err(ExpressionError::EmptyName));
        assert_eq!(parse_runtime_expr("vars.a"), Err(ExpressionError::MissingDollarPrefix));
    }
}
