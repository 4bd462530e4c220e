use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every generated operation.
    Operations {
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show one operation's parameters and result.
    Describe {
        operation: String,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load every specification and report all problems.
    Validate {
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Bind arguments to an operation and send the request.
    Call {
        operation: String,
        #[command(flatten)]
        call: CallArgs,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
