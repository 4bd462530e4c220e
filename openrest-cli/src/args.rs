use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Where the specifications come from: one ad-hoc specification (`--spec-file`/`--spec-url`)
/// takes precedence over a settings file.
#[derive(Debug, Args, Clone)]
pub struct SettingsArgs {
    #[arg(long, env = "OPENREST_SETTINGS")]
    pub settings: Option<PathBuf>,
    #[arg(long)]
    pub spec_file: Option<PathBuf>,
    #[arg(long)]
    pub spec_url: Option<String>,
    /// Service name used as the operation name prefix.
    #[arg(long, default_value = "Api")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub base_url: String,
    #[arg(long = "alias", value_name = "FROM=TO")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExpectArg {
    Any,
    Structured,
    Text,
    None,
}

#[derive(Debug, Args, Clone)]
pub struct CallArgs {
    #[arg(long = "arg", value_name = "NAME=VALUE")]
    pub arguments: Vec<String>,
    /// JSON request body.
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub variables: Vec<String>,
    #[arg(long, value_enum, default_value_t = ExpectArg::Any)]
    pub expect: ExpectArg,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 100)]
    pub timeout: u64,
}
