use openrest_core::ParameterSpec;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{OutputArgs, SettingsArgs};

use super::config::load_registry;

#[derive(Serialize)]
struct DescribeResult {
    name: String,
    category: &'static str,
    method: String,
    path: String,
    server_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    /// `None` when the verb has no generated form (HEAD, OPTIONS, TRACE).
    #[serde(skip_serializing_if = "Option::is_none")]
    returns: Option<String>,
    parameters: Vec<ParameterSpec>,
}

pub async fn describe_cmd(operation: &str, settings: &SettingsArgs, output: OutputArgs) -> i32 {
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

    let metadata = factory.metadata();
    let result = DescribeResult {
        name: factory.name().to_string(),
        category: factory.category(),
        method: metadata.verb.as_method().to_string(),
        path: metadata.path.clone(),
        server_url: metadata.server_url.clone(),
        summary: factory.summary().map(str::to_string),
        returns: factory.output_shape().ok().map(|s| s.to_string()),
        parameters: factory.catalog().iter().cloned().collect(),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("{} [{}]", result.name, result.category);
        println!("  {} {}{}", result.method, result.server_url, result.path);
        if let Some(s) = &result.summary {
            println!("  {s}");
        }
        match &result.returns {
            Some(shape) => println!("  returns: {shape}"),
            None => println!("  returns: (not implemented)"),
        }
        println!("  parameters:");
        for p in &result.parameters {
            let location = p.location().map(|l| l.to_string()).unwrap_or_else(|| "-".into());
            let required = if p.required { "required" } else { "optional" };
            print!("    - {}: {} ({}, {}, {required})", p.name, p.value_type, p.kind_name(), location);
            match &p.default_value {
                Some(d) if !d.is_empty() => println!(" default '{d}'"),
                _ => println!(),
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
