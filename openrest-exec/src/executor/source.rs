use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use openrest_core::expressions::{
    parse_runtime_expr, parse_template, ExpressionError, RuntimeExpr, Segment, Template,
};
use openrest_core::{ErrorKind, RunError, ValueType};
use serde_json::Value as JsonValue;

use super::cancel::CancelSignal;
use super::request::primitive_text;
use super::state::RuntimeState;

/// Something that produces an argument value when a bound operation runs.
#[async_trait]
pub trait ValueSource: Send + Sync + fmt::Debug {
    /// Type of the produced value, when it is known before evaluation.
    fn value_type(&self) -> Option<ValueType>;

    async fn evaluate(&self, state: &RuntimeState, cancel: &CancelSignal)
        -> Result<JsonValue, RunError>;

    /// How the source is written when an operation is displayed.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSource {
    value: JsonValue,
}

impl LiteralSource {
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(JsonValue::String(value.into()))
    }
}

#[async_trait]
impl ValueSource for LiteralSource {
    fn value_type(&self) -> Option<ValueType> {
        Some(ValueType::of_value(&self.value))
    }

    async fn evaluate(&self, _: &RuntimeState, _: &CancelSignal) -> Result<JsonValue, RunError> {
        Ok(self.value.clone())
    }

    fn describe(&self) -> String {
        self.value.to_string()
    }
}

/// Reads `$vars.name.field#/pointer` or `$env.NAME`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSource {
    text: String,
    expr: RuntimeExpr,
}

impl VariableSource {
    pub fn parse(text: &str) -> Result<Self, ExpressionError> {
        Ok(Self {
            text: text.trim().to_string(),
            expr: parse_runtime_expr(text)?,
        })
    }
}

#[async_trait]
impl ValueSource for VariableSource {
    fn value_type(&self) -> Option<ValueType> {
        None
    }

    async fn evaluate(&self, state: &RuntimeState, _: &CancelSignal) -> Result<JsonValue, RunError> {
        resolve_expr(&self.expr, state).map_err(evaluation_error)
    }

    fn describe(&self) -> String {
        self.text.clone()
    }
}

/// Text with embedded `{$vars.x}` expressions.
///
/// A template that is exactly one expression yields the expression's value unchanged;
/// otherwise the parts are rendered and concatenated into a string.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSource {
    text: String,
    template: Template,
}

impl TemplateSource {
    pub fn parse(text: &str) -> Result<Self, ExpressionError> {
        Ok(Self {
            text: text.to_string(),
            template: parse_template(text)?,
        })
    }

    fn single_expr(&self) -> Option<&RuntimeExpr> {
        match self.template.segments.as_slice() {
            [Segment::Expr(expr)] => Some(expr),
            _ => None,
        }
    }
}

#[async_trait]
impl ValueSource for TemplateSource {
    fn value_type(&self) -> Option<ValueType> {
        match self.single_expr() {
            Some(_) => None,
            None => Some(ValueType::Text),
        }
    }

    async fn evaluate(&self, state: &RuntimeState, _: &CancelSignal) -> Result<JsonValue, RunError> {
        if let Some(expr) = self.single_expr() {
            return resolve_expr(expr, state).map_err(evaluation_error);
        }
        let mut out = String::new();
        for segment in &self.template.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expr(expr) => {
                    let value = resolve_expr(expr, state).map_err(evaluation_error)?;
                    out.push_str(&primitive_text(&value));
                }
            }
        }
        Ok(JsonValue::String(out))
    }

    fn describe(&self) -> String {
        JsonValue::String(self.text.clone()).to_string()
    }
}

/// Interprets command-line style argument text: `$...` is a variable, text with
/// `{$...}` is a template, valid JSON is a literal of that value, anything else a string.
pub fn source_from_text(text: &str) -> Result<Arc<dyn ValueSource>, ExpressionError> {
    let trimmed = text.trim();
    if trimmed.starts_with('$') {
        return Ok(Arc::new(VariableSource::parse(trimmed)?));
    }
    let template = TemplateSource::parse(text)?;
    if !template.template.is_literal() {
        return Ok(Arc::new(template));
    }
    let value = serde_json::from_str::<JsonValue>(trimmed)
        .unwrap_or_else(|_| JsonValue::String(text.to_string()));
    Ok(Arc::new(LiteralSource::new(value)))
}

fn resolve_expr(expr: &RuntimeExpr, state: &RuntimeState) -> Result<JsonValue, ExpressionError> {
    match expr {
        RuntimeExpr::Env(name) => std::env::var(name)
            .map(JsonValue::String)
            .map_err(|_| ExpressionError::UndefinedEnv(name.clone())),
        RuntimeExpr::Vars(path) => {
            let mut value = state
                .get_variable(&path.root)
                .ok_or_else(|| ExpressionError::UndefinedVariable(path.root.clone()))?;
            let mut walked = path.root.clone();
            for field in &path.rest {
                walked.push('.');
                walked.push_str(field);
                value = value
                    .get(field)
                    .cloned()
                    .ok_or_else(|| ExpressionError::UndefinedVariable(walked.clone()))?;
            }
            match &path.pointer {
                Some(pointer) => pointer.resolve(&value).cloned().ok_or_else(|| {
                    ExpressionError::UndefinedVariable(format!("{walked}#{}", pointer.as_str()))
                }),
                None => Ok(value),
            }
        }
    }
}

fn evaluation_error(e: ExpressionError) -> RunError {
    ErrorKind::Evaluation(e.to_string()).into()
}
