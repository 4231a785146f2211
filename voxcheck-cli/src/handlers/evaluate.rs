//! Single-input evaluation handler

use crate::args::EvaluateArgs;
use crate::context::VoxcheckCliContext;
use crate::output::*;
use crate::utils::read_input;
use voxcheck::VoxcheckError;
use voxcheck::models::ReviewStatus;

pub async fn handle_evaluate_command(
    args: EvaluateArgs,
    ctx: &VoxcheckCliContext,
    output_format: &str,
) -> voxcheck::Result<()> {
    let input = read_input(&args.input)?;
    let decision = ctx.engine.evaluate(&input).await;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&decision).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_decision(&decision);
    }

    if args.fail_unless_pass && decision.review_status != ReviewStatus::AutoPass {
        return Err(VoxcheckError::Other(format!(
            "Validation did not pass: {}",
            decision.review_status
        )));
    }

    Ok(())
}
