use std::fmt;

use thiserror::Error;

/// Where in the host script a call site lives.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextLocation {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl TextLocation {
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            text: text.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: '{}'", self.line, self.column, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid specification: {0}")]
    InvalidSpecification(String),
    #[error("could not load OpenAPI specification: {0}")]
    CouldNotLoadSpecification(String),
    #[error("operation '{0}' is not implemented")]
    OperationNotImplemented(String),
    #[error("missing parameter '{0}'")]
    MissingParameter(String),
    #[error("'{step}' expected {expected}{} but got {actual}", parameter_suffix(.parameter))]
    WrongType {
        step: String,
        expected: String,
        parameter: Option<String>,
        actual: String,
    },
    #[error("request failed with status {status} ({description}): {message}")]
    RequestFailed {
        status: u16,
        description: String,
        message: String,
    },
    #[error("could not parse '{text}' as {format}")]
    CouldNotParse { text: String, format: String },
    #[error("could not evaluate argument: {0}")]
    Evaluation(String),
    #[error("unknown error: {0}")]
    Unknown(String),
}

fn parameter_suffix(parameter: &Option<String>) -> String {
    match parameter {
        Some(p) => format!(" for parameter '{p}'"),
        None => String::new(),
    }
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSpecification(_) => "InvalidSpecification",
            ErrorKind::CouldNotLoadSpecification(_) => "CouldNotLoadSpecification",
            ErrorKind::OperationNotImplemented(_) => "OperationNotImplemented",
            ErrorKind::MissingParameter(_) => "MissingParameter",
            ErrorKind::WrongType { .. } => "WrongType",
            ErrorKind::RequestFailed { .. } => "RequestFailed",
            ErrorKind::CouldNotParse { .. } => "CouldNotParse",
            ErrorKind::Evaluation(_) => "Evaluation",
            ErrorKind::Unknown(_) => "Unknown",
        }
    }
}

/// A single failure, optionally annotated with the call site that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    pub kind: ErrorKind,
    pub location: Option<TextLocation>,
}

impl StepError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    /// Annotates the error unless it already carries a (more specific) location.
    pub fn with_location(mut self, location: Option<&TextLocation>) -> Self {
        if self.location.is_none() {
            self.location = location.cloned();
        }
        self
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} (at {loc})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for StepError {}

impl From<ErrorKind> for StepError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// One or more errors reported together.
///
/// Binding and argument evaluation collect every failure instead of stopping at the
/// first one; this is the combined form handed back to callers. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList {
    errors: Vec<StepError>,
}

impl ErrorList {
    pub fn single(error: impl Into<StepError>) -> Self {
        Self {
            errors: vec![error.into()],
        }
    }

    /// Returns `None` for an empty input.
    pub fn from_errors(errors: Vec<StepError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Flattens several lists into one, preserving order.
    pub fn combine(lists: impl IntoIterator<Item = ErrorList>) -> Option<Self> {
        Self::from_errors(lists.into_iter().flat_map(|l| l.errors).collect())
    }

    pub fn errors(&self) -> &[StepError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepError> {
        self.errors.iter()
    }

    pub fn with_location(self, location: Option<&TextLocation>) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|e| e.with_location(location))
                .collect(),
        }
    }

    pub fn first(&self) -> &StepError {
        // Constructors guarantee at least one entry.
        &self.errors[0]
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ErrorList {}

impl From<StepError> for ErrorList {
    fn from(error: StepError) -> Self {
        Self::single(error)
    }
}

impl From<ErrorKind> for ErrorList {
    fn from(kind: ErrorKind) -> Self {
        Self::single(kind)
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a StepError;
    type IntoIter = std::slice::Iter<'a, StepError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Outcome of running a bound operation that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Failed(#[from] ErrorList),
}

impl RunError {
    pub fn errors(&self) -> Option<&ErrorList> {
        match self {
            RunError::Cancelled => None,
            RunError::Failed(list) => Some(list),
        }
    }
}

impl From<StepError> for RunError {
    fn from(error: StepError) -> Self {
        RunError::Failed(ErrorList::single(error))
    }
}

impl From<ErrorKind> for RunError {
    fn from(kind: ErrorKind) -> Self {
        RunError::Failed(ErrorList::single(kind))
    }
}
