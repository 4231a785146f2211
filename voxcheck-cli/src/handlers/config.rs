//! Configuration inspection handlers

use crate::commands::ConfigCommands;
use crate::output::*;
use voxcheck::config::VoxcheckConfig;
use voxcheck::config::validation::validate_config;

pub fn handle_config_command(
    cmd: ConfigCommands,
    config: &VoxcheckConfig,
    output_format: &str,
) -> voxcheck::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            if output_format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                print_config(config);
            }
        }

        ConfigCommands::Validate => {
            validate_config(config)?;
            if output_format == "json" {
                println!("{}", serde_json::json!({"valid": true}));
            } else {
                println!("{}", format_success("Configuration is valid"));
            }
        }
    }

    Ok(())
}
