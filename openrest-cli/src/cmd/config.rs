use std::collections::BTreeMap;

use openrest_core::{ErrorKind, ErrorList};
use openrest_exec::settings::SettingsError;
use openrest_exec::{ConnectorSettings, OperationRegistry, SpecLoader, SpecificationSettings};

use crate::exit_codes;
use crate::output::{print_error, print_errors};
use crate::{OutputArgs, SettingsArgs};

/// Splits `NAME=VALUE` pairs; the value may itself contain `=`.
pub fn parse_pairs(pairs: &[String], flag: &str) -> Result<Vec<(String, String)>, String> {
    pairs
        .iter()
        .map(|s| match s.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
            _ => Err(format!("--{flag} expects NAME=VALUE, got '{s}'")),
        })
        .collect()
}

pub async fn load_settings(
    args: &SettingsArgs,
    output: &OutputArgs,
) -> Result<ConnectorSettings, i32> {
    if args.spec_file.is_some() || args.spec_url.is_some() {
        let aliases = match parse_pairs(&args.aliases, "alias") {
            Ok(pairs) => pairs.into_iter().collect::<BTreeMap<_, _>>(),
            Err(e) => {
                print_error(output.format, output.quiet, &e);
                return Err(exit_codes::VALIDATION_FAILED);
            }
        };
        let spec = SpecificationSettings {
            name: args.name.clone(),
            base_url: args.base_url.clone(),
            specification_file: args.spec_file.clone(),
            specification_url: args.spec_url.clone(),
            aliases: (!aliases.is_empty()).then_some(aliases),
            ..Default::default()
        };
        return Ok(ConnectorSettings {
            specifications: vec![spec],
        });
    }

    let Some(path) = &args.settings else {
        print_error(
            output.format,
            output.quiet,
            "no specification configured; pass --settings, --spec-file or --spec-url (or set OPENREST_SETTINGS)",
        );
        return Err(exit_codes::RUNTIME_ERROR);
    };
    ConnectorSettings::from_file(path).await.map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        match e {
            SettingsError::Read { .. } => exit_codes::RUNTIME_ERROR,
            SettingsError::Parse(_) => exit_codes::VALIDATION_FAILED,
        }
    })
}

/// Loads the configured specifications; on failure prints every error and returns the exit code.
pub async fn load_registry(
    args: &SettingsArgs,
    output: &OutputArgs,
) -> Result<OperationRegistry, i32> {
    let settings = load_settings(args, output).await?;
    OperationRegistry::load(&settings, &SpecLoader::default())
        .await
        .map_err(|errors| {
            print_errors(
                output.format,
                output.quiet,
                "failed to load specifications",
                &errors,
            );
            load_exit_code(&errors)
        })
}

/// Unreachable sources are runtime errors; anything else is a broken document.
pub fn load_exit_code(errors: &ErrorList) -> i32 {
    if errors
        .iter()
        .any(|e| matches!(e.kind, ErrorKind::CouldNotLoadSpecification(_)))
    {
        exit_codes::RUNTIME_ERROR
    } else {
        exit_codes::VALIDATION_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_keep_equals_in_values() {
        let pairs = parse_pairs(&["q=a=b".to_string(), " id =7".to_string()], "arg").unwrap();
        assert_eq!(
            pairs,
            vec![("q".to_string(), "a=b".to_string()), ("id".to_string(), "7".to_string())]
        );
    }

    #[test]
    fn pairs_without_name_are_rejected() {
        assert!(parse_pairs(&["=x".to_string()], "arg").is_err());
        assert!(parse_pairs(&["novalue".to_string()], "var").is_err());
    }
}
