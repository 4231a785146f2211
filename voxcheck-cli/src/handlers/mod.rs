//! Command handlers for the voxcheck CLI

pub mod batch;
pub mod config;
pub mod evaluate;

pub use batch::{evaluate_batch, handle_batch_command};
pub use config::handle_config_command;
pub use evaluate::handle_evaluate_command;
