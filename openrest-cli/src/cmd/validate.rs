use openrest_exec::{OperationRegistry, SpecLoader};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{OutputArgs, SettingsArgs};

use super::config::{load_exit_code, load_settings};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    specifications: usize,
    operations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(settings: &SettingsArgs, output: OutputArgs) -> i32 {
    let settings = match load_settings(settings, &output).await {
        Ok(s) => s,
        Err(code) => return code,
    };
    let specifications = settings.specifications.len();

    match OperationRegistry::load(&settings, &SpecLoader::default()).await {
        Ok(registry) => {
            let result = ValidateResult {
                valid: true,
                specifications,
                operations: registry.len(),
                errors: vec![],
            };
            if output.format == OutputFormat::Text && !output.quiet {
                println!(
                    "ok: {} operations from {} specifications",
                    result.operations, result.specifications
                );
            } else {
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(errors) => {
            let code = load_exit_code(&errors);
            let result = ValidateResult {
                valid: false,
                specifications,
                operations: 0,
                errors: errors.iter().map(|e| e.to_string()).collect(),
            };
            if output.format == OutputFormat::Text && !output.quiet {
                eprintln!("error: validation failed");
                for e in &result.errors {
                    eprintln!("- {e}");
                }
            } else {
                print_result(output.format, output.quiet, &result);
            }
            code
        }
    }
}
