use clap::{CommandFactory, Parser};
use clap_complete::{Shell as CompleteShell, generate};
use std::path::PathBuf;
use voxcheck::config::LogLevel;
use voxcheck_cli::args::Shell;
use voxcheck_cli::commands::Commands;
use voxcheck_cli::handlers::{
    handle_batch_command, handle_config_command, handle_evaluate_command,
};
use voxcheck_cli::{VoxcheckCliContext, load_config, output_error_json};

#[derive(Parser)]
#[command(name = "voxcheck")]
#[command(
    about = "Validate voice assistant responses against expected outcomes",
    long_about = None
)]
#[command(version = voxcheck::VERSION)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); defaults are searched otherwise
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();

    // Determine output format - priority: machine flag > env var > cli arg > default
    let output_format = if cli_args.machine {
        "json".to_string()
    } else if let Ok(env_output) = std::env::var("VOXCHECK_OUTPUT") {
        env_output
    } else {
        cli_args.output.clone()
    };

    if let Err(e) = run(cli_args, &output_format).await {
        output_error_json(&e, &output_format);
        std::process::exit(1);
    }
}

async fn run(cli_args: Cli, output_format: &str) -> voxcheck::Result<()> {
    match &cli_args.command {
        Commands::Version => {
            println!("voxcheck v{}", voxcheck::VERSION);
            return Ok(());
        }
        Commands::Completions(args) => {
            let shell = match args.shell {
                Shell::Bash => CompleteShell::Bash,
                Shell::Zsh => CompleteShell::Zsh,
                Shell::Fish => CompleteShell::Fish,
                Shell::Power => CompleteShell::PowerShell,
                Shell::Elvish => CompleteShell::Elvish,
            };
            let mut command = Cli::command();
            generate(shell, &mut command, "voxcheck", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let mut config = load_config(cli_args.config.as_deref())?;

    let is_quiet = cli_args.quiet
        || std::env::var("VOXCHECK_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // Machine mode keeps stdout clean for JSON
    config.logging.level = if is_quiet || output_format == "json" {
        LogLevel::Error
    } else if cli_args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let _log_guard = voxcheck::logging::init(&config.logging)?;

    match cli_args.command {
        Commands::Config(cmd) => handle_config_command(cmd, &config, output_format),
        Commands::Evaluate(args) => {
            let ctx = VoxcheckCliContext::new(config)?;
            handle_evaluate_command(args, &ctx, output_format).await
        }
        Commands::Batch(args) => {
            let ctx = VoxcheckCliContext::new(config)?;
            handle_batch_command(args, &ctx, output_format).await
        }
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}
