//! Batch evaluation handler

use crate::args::BatchArgs;
use crate::context::VoxcheckCliContext;
use crate::output::*;
use crate::utils::read_inputs;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde_json::json;
use voxcheck::ValidationEngine;
use voxcheck::models::{Decision, ReviewStatus, ValidationInput};

/// Evaluate every input concurrently, keeping input order.
pub async fn evaluate_batch(
    engine: &ValidationEngine,
    inputs: &[ValidationInput],
    progress: Option<&ProgressBar>,
) -> Vec<(usize, Decision)> {
    let evaluations = inputs.iter().enumerate().map(|(index, input)| async move {
        let decision = engine.evaluate(input).await;
        if let Some(pb) = progress {
            pb.inc(1);
        }
        (index, decision)
    });

    join_all(evaluations).await
}

pub async fn handle_batch_command(
    args: BatchArgs,
    ctx: &VoxcheckCliContext,
    output_format: &str,
) -> voxcheck::Result<()> {
    let inputs = read_inputs(&args.file)?;

    // Create progress bar if stdout is a TTY and not JSON output
    let pb = if std::io::stdout().is_terminal() && output_format != "json" && inputs.len() > 5 {
        let pb = ProgressBar::new(inputs.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let results = evaluate_batch(&ctx.engine, &inputs, pb.as_ref()).await;

    if let Some(progress_bar) = &pb {
        progress_bar.finish_with_message(format!("Evaluated {} inputs", results.len()));
    }

    if output_format == "json" {
        let entries: Vec<_> = results
            .iter()
            .filter(|(_, d)| !args.only_flagged || d.review_status != ReviewStatus::AutoPass)
            .map(|(index, decision)| json!({"index": index, "decision": decision}))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        print_batch_summary(&results, args.only_flagged);
    }

    Ok(())
}
