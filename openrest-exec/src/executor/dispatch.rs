use openrest_core::{ErrorKind, RunError, StepOutput, TextLocation};

use super::cancel::CancelSignal;
use super::http::HttpError;
use super::request::RestRequest;
use super::response::ResultConverter;
use super::state::RuntimeState;

/// Sends one request to `server_url` and converts a successful response.
///
/// No retries: every failure is final for this call.
pub(crate) async fn send_request(
    request: RestRequest,
    server_url: &str,
    converter: ResultConverter,
    state: &RuntimeState,
    cancel: &CancelSignal,
) -> Result<StepOutput, RunError> {
    if cancel.is_cancelled() {
        return Err(RunError::Cancelled);
    }
    let client = state.http().create_client(server_url);
    tracing::debug!(
        method = request.method.as_method(),
        resource = %request.resource,
        server = server_url,
        parameters = request.parameter_count(),
        "dispatching request"
    );

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(RunError::Cancelled),
        outcome = client.execute(request, cancel) => outcome,
    };
    let response = match outcome {
        Ok(response) => response,
        Err(HttpError::Cancelled) => return Err(RunError::Cancelled),
        Err(e) => return Err(ErrorKind::Unknown(e.to_string()).into()),
    };

    if !response.is_success() {
        tracing::debug!(status = response.status, "request failed");
        return Err(ErrorKind::RequestFailed {
            status: response.status,
            description: response.status_description.clone(),
            message: response.error_message.clone().unwrap_or_default(),
        }
        .into());
    }
    converter.convert(&response.body).map_err(RunError::from)
}

/// Attaches the call site to every error produced by a run.
pub(crate) fn at_location(error: RunError, location: Option<&TextLocation>) -> RunError {
    match error {
        RunError::Cancelled => RunError::Cancelled,
        RunError::Failed(errors) => RunError::Failed(errors.with_location(location)),
    }
}
