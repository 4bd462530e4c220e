use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use openrest_core::{
    ErrorKind, ErrorList, ExpectedOutput, OperationMetadata, ResultShape, StepError,
    TextLocation,
};

use crate::executor::{BoundOperation, BoundParameter, LiteralSource, ResultConverter, ValueSource};
use crate::openapi::ParameterCatalog;

/// Category every generated operation is listed under.
pub const CATEGORY: &str = "REST";

/// Arguments supplied at a call site, keyed by parameter name.
#[derive(Debug, Clone, Default)]
pub struct FreezeData {
    pub arguments: BTreeMap<String, Arc<dyn ValueSource>>,
    pub location: Option<TextLocation>,
}

impl FreezeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_argument(mut self, name: impl Into<String>, source: Arc<dyn ValueSource>) -> Self {
        self.arguments.insert(name.into(), source);
        self
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Binds call-site arguments to one generated operation.
#[derive(Debug, Clone)]
pub struct OperationFactory {
    metadata: Arc<OperationMetadata>,
    catalog: Arc<ParameterCatalog>,
}

impl OperationFactory {
    pub fn new(metadata: OperationMetadata, catalog: ParameterCatalog) -> Self {
        Self {
            metadata: Arc::new(metadata),
            catalog: Arc::new(catalog),
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn metadata(&self) -> &OperationMetadata {
        &self.metadata
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn summary(&self) -> Option<&str> {
        self.metadata.summary.as_deref()
    }

    pub fn category(&self) -> &'static str {
        CATEGORY
    }

    /// The result a successful call produces, decided by the HTTP verb.
    pub fn output_shape(&self) -> Result<ResultShape, StepError> {
        self.metadata.verb.result_shape().ok_or_else(|| {
            ErrorKind::OperationNotImplemented(self.metadata.verb.display_name().to_string()).into()
        })
    }

    /// Resolves every catalog entry against the supplied arguments.
    ///
    /// An incompatible expected result fails on its own; otherwise all binding
    /// problems are collected and reported together.
    pub fn bind(
        &self,
        expected: ExpectedOutput,
        freeze: FreezeData,
    ) -> Result<BoundOperation, ErrorList> {
        let location = freeze.location.as_ref();
        let shape = self
            .output_shape()
            .map_err(|e| ErrorList::single(e.with_location(location)))?;
        if !expected.allows(shape) {
            return Err(ErrorList::single(
                StepError::new(ErrorKind::WrongType {
                    step: self.name().to_string(),
                    expected: expected.to_string(),
                    parameter: None,
                    actual: shape.to_string(),
                })
                .with_location(location),
            ));
        }

        for name in freeze.arguments.keys() {
            if self.catalog.get(name).is_none() {
                tracing::warn!(operation = self.name(), argument = %name, "ignoring unknown argument");
            }
        }

        let mut errors = Vec::<StepError>::new();
        let mut parameters = Vec::new();
        let mut body = None;
        for spec in self.catalog.iter() {
            let source = match freeze.arguments.get(&spec.name) {
                Some(source) => {
                    if let Some(actual) = source.value_type() {
                        if !spec.value_type.accepts(&actual) {
                            errors.push(StepError::new(ErrorKind::WrongType {
                                step: self.name().to_string(),
                                expected: spec.value_type.to_string(),
                                parameter: Some(spec.name.clone()),
                                actual: actual.to_string(),
                            }));
                            continue;
                        }
                    }
                    Arc::clone(source)
                }
                None if !spec.required => continue,
                None => match (&spec.default_value, spec.is_body()) {
                    (Some(default), false) => {
                        Arc::new(LiteralSource::text(default.clone())) as Arc<dyn ValueSource>
                    }
                    _ => {
                        errors.push(StepError::new(ErrorKind::MissingParameter(spec.name.clone())));
                        continue;
                    }
                },
            };
            let bound = BoundParameter {
                spec: spec.clone(),
                source,
            };
            if spec.is_body() {
                body = Some(bound);
            } else {
                parameters.push(bound);
            }
        }

        if let Some(errors) = ErrorList::from_errors(errors) {
            return Err(errors.with_location(location));
        }

        tracing::debug!(operation = self.name(), parameters = parameters.len(), body = body.is_some(), "bound operation");
        Ok(BoundOperation::new(
            Arc::clone(&self.metadata),
            parameters,
            body,
            ResultConverter::for_shape(shape),
            freeze.location,
        ))
    }
}

impl fmt::Display for OperationFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
