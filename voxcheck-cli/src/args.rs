//! Command argument structures

use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct EvaluateArgs {
    /// JSON file holding one validation input ("-" reads stdin)
    pub input: PathBuf,

    /// Exit with a non-zero status unless the result is auto_pass
    #[arg(long)]
    pub fail_unless_pass: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// JSON file holding an array of validation inputs, or an object with an
    /// "inputs" array
    pub file: PathBuf,

    /// Only print inputs that did not pass automatically
    #[arg(long)]
    pub only_flagged: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}
