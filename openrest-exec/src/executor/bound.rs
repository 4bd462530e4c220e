use std::fmt;
use std::sync::Arc;

use openrest_core::{
    ErrorKind, ErrorList, OperationMetadata, ParameterLocation, ParameterSpec, ResultShape,
    RunError, StepOutput, TextLocation, ValueType,
};

use super::cancel::CancelSignal;
use super::dispatch::{at_location, send_request};
use super::request::{primitive_text, RestRequest};
use super::response::ResultConverter;
use super::source::ValueSource;
use super::state::RuntimeState;

#[derive(Debug, Clone)]
pub struct BoundParameter {
    pub spec: ParameterSpec,
    pub source: Arc<dyn ValueSource>,
}

/// An operation with every argument slot resolved to a source, ready to run.
///
/// Holds no mutable state; the same instance may run any number of times, concurrently.
#[derive(Debug, Clone)]
pub struct BoundOperation {
    metadata: Arc<OperationMetadata>,
    parameters: Vec<BoundParameter>,
    body: Option<BoundParameter>,
    converter: ResultConverter,
    location: Option<TextLocation>,
}

impl BoundOperation {
    pub(crate) fn new(
        metadata: Arc<OperationMetadata>,
        parameters: Vec<BoundParameter>,
        body: Option<BoundParameter>,
        converter: ResultConverter,
        location: Option<TextLocation>,
    ) -> Self {
        Self {
            metadata,
            parameters,
            body,
            converter,
            location,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn metadata(&self) -> &OperationMetadata {
        &self.metadata
    }

    /// Non-body parameters in evaluation order.
    pub fn parameters(&self) -> &[BoundParameter] {
        &self.parameters
    }

    pub fn body(&self) -> Option<&BoundParameter> {
        self.body.as_ref()
    }

    pub fn output_shape(&self) -> ResultShape {
        self.converter.shape()
    }

    pub fn location(&self) -> Option<&TextLocation> {
        self.location.as_ref()
    }

    pub async fn run(
        &self,
        state: &RuntimeState,
        cancel: &CancelSignal,
    ) -> Result<StepOutput, RunError> {
        self.run_unlocated(state, cancel)
            .await
            .map_err(|e| at_location(e, self.location.as_ref()))
    }

    async fn run_unlocated(
        &self,
        state: &RuntimeState,
        cancel: &CancelSignal,
    ) -> Result<StepOutput, RunError> {
        let mut request = RestRequest::new(self.metadata.verb, self.metadata.path.clone());

        // Sequential: sources may depend on state written by earlier ones.
        let mut failures = Vec::new();
        for bound in &self.parameters {
            if cancel.is_cancelled() {
                return Err(RunError::Cancelled);
            }
            match bound.source.evaluate(state, cancel).await {
                Ok(value) => {
                    // Security schemes without a location go in as cookies.
                    let location = bound.spec.location().unwrap_or(ParameterLocation::Cookie);
                    request.add_parameter(&bound.spec.name, primitive_text(&value), location);
                }
                Err(RunError::Cancelled) => return Err(RunError::Cancelled),
                Err(RunError::Failed(errors)) => failures.push(errors),
            }
        }
        if let Some(errors) = ErrorList::combine(failures) {
            return Err(errors.into());
        }

        if let Some(body) = &self.body {
            if cancel.is_cancelled() {
                return Err(RunError::Cancelled);
            }
            let value = body.source.evaluate(state, cancel).await?;
            if !value.is_object() {
                return Err(ErrorKind::WrongType {
                    step: self.name().to_string(),
                    expected: ValueType::StructuredObject.to_string(),
                    parameter: Some(body.spec.name.clone()),
                    actual: ValueType::of_value(&value).to_string(),
                }
                .into());
            }
            request.set_json_body(value);
        }

        send_request(request, &self.metadata.server_url, self.converter, state, cancel).await
    }
}

impl fmt::Display for BoundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for bound in self.parameters.iter().chain(self.body.as_ref()) {
            write!(f, " {}: {}", bound.spec.name, bound.source.describe())?;
        }
        Ok(())
    }
}
