//! Expressions accepted by template value sources.
//!
//! - `$vars.<name>[.<field>...][#<json-pointer>]` reads a runtime variable.
//! - `$env.<NAME>` reads a process environment variable.
//! - Any other string may embed `{$...}` segments, which are rendered as text.

mod json_pointer;
mod runtime;
mod template;

pub use json_pointer::{JsonPointer, JsonPointerError};
pub use runtime::{parse_runtime_expr, ExpressionError, NamePath, RuntimeExpr};
pub use template::{parse_template, Segment, Template};
