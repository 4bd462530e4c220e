#![forbid(unsafe_code)]

pub mod error;
pub mod expressions;
pub mod naming;
pub mod parser;
pub mod schema;
pub mod types;

pub use crate::error::{ErrorKind, ErrorList, RunError, StepError, TextLocation};
pub use crate::naming::{apply_alias, generated_name, sanitize_name};
pub use crate::parser::{parse_openapi_str, Diagnostic, DocumentFormat, OpenApiDocument, SpecVersion};
pub use crate::schema::{map_schema_type, NoRefs, RefLookup, SchemaTypeError};
pub use crate::types::{
    ExpectedOutput, HttpVerb, OperationMetadata, ParameterKind, ParameterLocation, ParameterSpec,
    ResultShape, StepOutput, ValueType, BODY_PARAMETER_NAME,
};
