use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use openrest_core::{ExpectedOutput, ResultShape, RunError, StepOutput, BODY_PARAMETER_NAME};
use openrest_exec::executor::{source_from_text, LiteralSource};
use openrest_exec::{CancelHandle, FreezeData, ReqwestClientFactory, RuntimeState};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::exit_codes;
use crate::output::{print_error, print_errors, print_result, OutputFormat};
use crate::{CallArgs, ExpectArg, OutputArgs, SettingsArgs};

use super::config::{load_registry, parse_pairs};

#[derive(Serialize)]
struct CallResult<'a> {
    operation: &'a str,
    result: &'a StepOutput,
}

pub async fn call_cmd(
    operation: &str,
    call: CallArgs,
    settings: &SettingsArgs,
    output: OutputArgs,
) -> i32 {
    let registry = match load_registry(settings, &output).await {
        Ok(r) => r,
        Err(code) => return code,
    };
    let Some(factory) = registry.get(operation) else {
        print_error(
            output.format,
            output.quiet,
            &format!("unknown operation '{operation}'"),
        );
        return exit_codes::VALIDATION_FAILED;
    };

    let freeze = match freeze_data(&call) {
        Ok(f) => f,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let variables = match parse_pairs(&call.variables, "var") {
        Ok(pairs) => pairs
            .into_iter()
            .map(|(k, v)| (k, json_or_text(&v)))
            .collect::<BTreeMap<_, _>>(),
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let bound = match factory.bind(expected_output(call.expect), freeze) {
        Ok(b) => b,
        Err(errors) => {
            print_errors(
                output.format,
                output.quiet,
                &format!("could not bind '{operation}'"),
                &errors,
            );
            return exit_codes::VALIDATION_FAILED;
        }
    };
    tracing::debug!(call = %bound, "calling operation");

    let http = ReqwestClientFactory::default().with_timeout(Duration::from_secs(call.timeout));
    let state = RuntimeState::new(Arc::new(http)).with_variables(variables);

    let (handle, signal) = CancelHandle::new();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; cancelling call");
            handle.cancel();
        }
    });
    let outcome = bound.run(&state, &signal).await;
    ctrl_c.abort();

    match outcome {
        Ok(result) => {
            print_output(&output, operation, &result);
            exit_codes::SUCCESS
        }
        Err(RunError::Cancelled) => {
            print_error(output.format, output.quiet, "call cancelled");
            exit_codes::CALL_FAILED
        }
        Err(RunError::Failed(errors)) => {
            print_errors(
                output.format,
                output.quiet,
                &format!("call to '{operation}' failed"),
                &errors,
            );
            exit_codes::CALL_FAILED
        }
    }
}

fn freeze_data(call: &CallArgs) -> Result<FreezeData, String> {
    let mut freeze = FreezeData::new();
    for (name, text) in parse_pairs(&call.arguments, "arg")? {
        let source = source_from_text(&text).map_err(|e| format!("argument '{name}': {e}"))?;
        freeze = freeze.with_argument(name, source);
    }
    if let Some(body) = &call.body {
        let value: JsonValue =
            serde_json::from_str(body).map_err(|e| format!("--body is not valid JSON: {e}"))?;
        freeze = freeze.with_argument(BODY_PARAMETER_NAME, Arc::new(LiteralSource::new(value)));
    }
    Ok(freeze)
}

fn json_or_text(text: &str) -> JsonValue {
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}

fn expected_output(expect: ExpectArg) -> ExpectedOutput {
    match expect {
        ExpectArg::Any => ExpectedOutput::Any,
        ExpectArg::Structured => ExpectedOutput::Exactly(ResultShape::StructuredObject),
        ExpectArg::Text => ExpectedOutput::Exactly(ResultShape::Text),
        ExpectArg::None => ExpectedOutput::Exactly(ResultShape::NoValue),
    }
}

fn print_output(output: &OutputArgs, operation: &str, result: &StepOutput) {
    if output.quiet {
        return;
    }
    match (output.format, result) {
        (OutputFormat::Text, StepOutput::Structured(map)) => {
            print_result(OutputFormat::Text, false, map);
        }
        (OutputFormat::Text, StepOutput::Text(text)) => println!("{text}"),
        (OutputFormat::Text, StepOutput::NoValue) => println!("ok: {operation} completed"),
        (OutputFormat::Json, _) => print_result(
            OutputFormat::Json,
            false,
            &CallResult { operation, result },
        ),
    }
}
