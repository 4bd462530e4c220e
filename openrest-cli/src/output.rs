use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(json) = rendered {
        println!("{json}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

/// A headline followed by one line per error.
pub fn print_errors<'a>(
    format: OutputFormat,
    quiet: bool,
    headline: &str,
    errors: impl IntoIterator<Item = &'a openrest_core::StepError>,
) {
    if quiet {
        return;
    }
    let errors: Vec<String> = errors.into_iter().map(|e| e.to_string()).collect();
    match format {
        OutputFormat::Text => {
            eprintln!("error: {headline}");
            for e in &errors {
                eprintln!("- {e}");
            }
        }
        OutputFormat::Json => {
            let err = serde_json::json!({"error": headline, "errors": errors});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
