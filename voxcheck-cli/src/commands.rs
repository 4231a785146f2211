//! Command enum definitions

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Evaluate a single validation input
    #[command(
        alias = "eval",
        long_about = r#"
Evaluate one validation input and print the decision.

The input is a JSON object with the assistant's actual response, optional
actual entities, the expected outcome, validation rules and conversational
context. Missing fields are allowed; signals that cannot be computed are
reported as missing and route the result to human review.

EXAMPLE INPUT:
  {
    "actual_response": "It is 75 degrees in New York",
    "actual_entities": {"city": "New York", "intent": "get_weather", "confidence": 0.92},
    "expected": {
      "intent": "get_weather",
      "entities": {"city": "New York"},
      "response": "It is 75 degrees in New York"
    },
    "rules": {"forbidden_phrases": ["sorry"], "max_length": 200}
  }

EXAMPLES:
  voxcheck evaluate case.json
  voxcheck evaluate case.json --output json
  cat case.json | voxcheck evaluate -
"#
    )]
    Evaluate(EvaluateArgs),

    /// Evaluate many validation inputs concurrently
    Batch(BatchArgs),

    /// Inspect the effective configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration after files and environment
    Show,

    /// Check that the configuration loads and validates
    Validate,
}
