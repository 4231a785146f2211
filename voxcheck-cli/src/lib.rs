pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::{VoxcheckCliContext, load_config};
pub use output::{
    CliColors, format_error, format_info, format_score, format_status, format_success,
    format_warning, output_error, output_error_json, print_batch_summary, print_config,
    print_decision,
};
pub use utils::{parse_input, parse_inputs, read_input, read_inputs};
