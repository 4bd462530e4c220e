//! Fixed REST calls that take their URL and payload as arguments instead of coming
//! from a specification.

use std::fmt;
use std::sync::Arc;

use openrest_core::{
    ErrorKind, ErrorList, HttpVerb, ParameterLocation, RunError, StepOutput, TextLocation,
    ValueType,
};
use serde_json::Value as JsonValue;

use super::cancel::CancelSignal;
use super::dispatch::{at_location, send_request};
use super::request::{primitive_text, RestRequest};
use super::response::ResultConverter;
use super::source::ValueSource;
use super::state::RuntimeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestStepKind {
    GetJson,
    GetStream,
    Post,
    Put,
    Patch,
    Delete,
}

impl RestStepKind {
    pub const ALL: [RestStepKind; 6] = [
        RestStepKind::GetJson,
        RestStepKind::GetStream,
        RestStepKind::Post,
        RestStepKind::Put,
        RestStepKind::Patch,
        RestStepKind::Delete,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RestStepKind::GetJson => "RESTGetJSON",
            RestStepKind::GetStream => "RESTGetStream",
            RestStepKind::Post => "RESTPost",
            RestStepKind::Put => "RESTPut",
            RestStepKind::Patch => "RESTPatch",
            RestStepKind::Delete => "RESTDelete",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    pub fn verb(&self) -> HttpVerb {
        match self {
            RestStepKind::GetJson | RestStepKind::GetStream => HttpVerb::Get,
            RestStepKind::Post => HttpVerb::Post,
            RestStepKind::Put => HttpVerb::Put,
            RestStepKind::Patch => HttpVerb::Patch,
            RestStepKind::Delete => HttpVerb::Delete,
        }
    }

    pub fn converter(&self) -> ResultConverter {
        match self {
            RestStepKind::GetJson => ResultConverter::Structured,
            RestStepKind::GetStream | RestStepKind::Post => ResultConverter::Text,
            RestStepKind::Put | RestStepKind::Patch | RestStepKind::Delete => {
                ResultConverter::Discard
            }
        }
    }

    pub fn takes_body(&self) -> bool {
        matches!(
            self,
            RestStepKind::Post | RestStepKind::Put | RestStepKind::Patch
        )
    }
}

impl fmt::Display for RestStepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct RestStep {
    pub kind: RestStepKind,
    pub base_url: Arc<dyn ValueSource>,
    pub relative_url: Arc<dyn ValueSource>,
    pub headers: Option<Arc<dyn ValueSource>>,
    /// Request payload; required for the kinds that send one.
    pub body: Option<Arc<dyn ValueSource>>,
    pub location: Option<TextLocation>,
}

impl RestStep {
    pub fn new(
        kind: RestStepKind,
        base_url: Arc<dyn ValueSource>,
        relative_url: Arc<dyn ValueSource>,
    ) -> Self {
        Self {
            kind,
            base_url,
            relative_url,
            headers: None,
            body: None,
            location: None,
        }
    }

    pub fn with_headers(mut self, headers: Arc<dyn ValueSource>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: Arc<dyn ValueSource>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn at(mut self, location: TextLocation) -> Self {
        self.location = Some(location);
        self
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
        if self.kind.takes_body() && self.body.is_none() {
            return Err(ErrorKind::MissingParameter("Entity".into()).into());
        }

        let base_url = primitive_text(&self.base_url.evaluate(state, cancel).await?);
        let relative_url = primitive_text(&self.relative_url.evaluate(state, cancel).await?);
        let mut request = RestRequest::new(self.kind.verb(), relative_url);

        if let Some(headers) = &self.headers {
            match headers.evaluate(state, cancel).await? {
                JsonValue::Object(map) => {
                    for (name, value) in &map {
                        request.add_parameter(name, primitive_text(value), ParameterLocation::Header);
                    }
                }
                other => return Err(self.wrong_type("Headers", &other).into()),
            }
        }

        if let Some(body) = &self.body {
            let value = body.evaluate(state, cancel).await?;
            if !value.is_object() {
                return Err(self.wrong_type("Entity", &value).into());
            }
            request.set_json_body(value);
        }

        send_request(request, &base_url, self.kind.converter(), state, cancel).await
    }

    fn wrong_type(&self, parameter: &str, value: &JsonValue) -> ErrorList {
        ErrorList::single(ErrorKind::WrongType {
            step: self.kind.name().to_string(),
            expected: ValueType::StructuredObject.to_string(),
            parameter: Some(parameter.to_string()),
            actual: ValueType::of_value(value).to_string(),
        })
    }
}

impl fmt::Display for RestStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} BaseURL: {} RelativeURL: {}",
            self.kind,
            self.base_url.describe(),
            self.relative_url.describe()
        )?;
        if let Some(headers) = &self.headers {
            write!(f, " Headers: {}", headers.describe())?;
        }
        if let Some(body) = &self.body {
            write!(f, " Entity: {}", body.describe())?;
        }
        Ok(())
    }
}
