use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{OutputArgs, SettingsArgs};

use super::config::load_registry;

#[derive(Serialize)]
struct OperationInfo {
    name: String,
    service: String,
    method: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    parameter_count: usize,
}

#[derive(Serialize)]
struct OperationsResult {
    operations: Vec<OperationInfo>,
}

pub async fn operations_cmd(settings: &SettingsArgs, output: OutputArgs) -> i32 {
    let registry = match load_registry(settings, &output).await {
        Ok(r) => r,
        Err(code) => return code,
    };

    let operations: Vec<OperationInfo> = registry
        .iter()
        .map(|f| OperationInfo {
            name: f.name().to_string(),
            service: f.metadata().service_name.clone(),
            method: f.metadata().verb.as_method().to_string(),
            path: f.metadata().path.clone(),
            summary: f.summary().map(str::to_string),
            parameter_count: f.catalog().len(),
        })
        .collect();
    let result = OperationsResult { operations };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("{} operations:", result.operations.len());
        for op in &result.operations {
            println!("  - {} ({} {})", op.name, op.method, op.path);
            if let Some(s) = &op.summary {
                println!("    {s}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
