use colored::*;
use serde_json::json;
use voxcheck::VoxcheckError;
use voxcheck::config::VoxcheckConfig;
use voxcheck::models::{Decision, ReviewStatus};
use voxcheck::tolerance::ToleranceReport;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }
}

pub fn output_error(error_msg: &str, output_format: &str) {
    if output_format == "json" {
        let error_response = json!({
            "error": true,
            "message": error_msg,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        tracing::error!("{}", error_msg);
    }
}

/// Output a VoxcheckError in structured JSON format
pub fn output_error_json(error: &VoxcheckError, output_format: &str) {
    if output_format == "json" {
        let code = match error {
            VoxcheckError::Configuration(_) => "CONFIGURATION_ERROR",
            VoxcheckError::Logging(_) => "LOGGING_ERROR",
            VoxcheckError::Input(_) => "INPUT_ERROR",
            VoxcheckError::Io(_) => "IO_ERROR",
            VoxcheckError::Other(_) => "OTHER_ERROR",
        };

        let error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_status(status: ReviewStatus) -> ColoredString {
    match status {
        ReviewStatus::AutoPass => status.as_str().color(CliColors::success()).bold(),
        ReviewStatus::NeedsReview => status.as_str().color(CliColors::warning()).bold(),
        ReviewStatus::AutoFail => status.as_str().color(CliColors::error()).bold(),
    }
}

pub fn format_score(score: Option<f64>) -> ColoredString {
    match score {
        Some(score) => format!("{:.2}", score).color(CliColors::primary()),
        None => "missing".color(CliColors::muted()).italic(),
    }
}

fn format_check(passed: bool) -> ColoredString {
    if passed {
        "pass".color(CliColors::success())
    } else {
        "fail".color(CliColors::error())
    }
}

pub fn print_decision(decision: &Decision) {
    println!(
        "{}",
        "━━━ Validation Decision ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Status".color(CliColors::muted()),
        format_status(decision.review_status)
    );
    println!(
        "{}: {}",
        "Rationale".color(CliColors::muted()),
        decision.rationale
    );

    let scores = &decision.scores;
    println!();
    println!("{}", "Scores".color(CliColors::accent()));
    println!(
        "  {:<22} {}",
        "semantic similarity".color(CliColors::muted()),
        format_score(scores.semantic_similarity)
    );
    println!(
        "  {:<22} {}",
        "intent match".color(CliColors::muted()),
        format_score(scores.intent_match)
    );
    println!(
        "  {:<22} {}",
        "intent confidence".color(CliColors::muted()),
        format_score(scores.intent_confidence)
    );
    println!(
        "  {:<22} {}",
        "entity match".color(CliColors::muted()),
        format_score(scores.entity_match)
    );
    println!(
        "  {:<22} {}",
        "accuracy".color(CliColors::muted()),
        format_score(scores.accuracy)
    );
    println!(
        "  {:<22} {}",
        "confidence".color(CliColors::muted()),
        format_score(scores.confidence)
    );
    if let Some(predicted) = &scores.predicted_intent {
        println!(
            "  {:<22} {}",
            "predicted intent".color(CliColors::muted()),
            predicted.color(CliColors::info())
        );
    }

    for missing in &scores.missing {
        println!("  {}", format_warning(&missing.to_string()));
    }

    print_tolerance(&decision.tolerance);

    if let Some(reference) = &decision.reference {
        println!();
        println!("{}", "Reference".color(CliColors::accent()));
        let resolved = reference
            .resolved
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unresolved".to_string());
        println!(
            "  {:<22} {}",
            reference
                .phrase
                .as_deref()
                .unwrap_or("-")
                .color(CliColors::muted()),
            resolved
        );
        if let Some(matched) = reference.matched {
            println!(
                "  {:<22} {}",
                "matches expected".color(CliColors::muted()),
                format_check(matched)
            );
        }
    }

    let partial = &decision.partial_success;
    if partial.is_partial {
        println!();
        println!(
            "{}",
            format_info(&format!(
                "Partial success: matched [{}], missing [{}]",
                partial.matched_criteria.join(", "),
                partial.missing_criteria.join(", ")
            ))
        );
    }
}

fn print_tolerance(report: &ToleranceReport) {
    let outcomes = report.outcomes();
    if outcomes.is_empty() {
        return;
    }

    println!();
    println!("{}", "Tolerance checks".color(CliColors::accent()));
    for (check, passed) in outcomes {
        println!(
            "  {:<22} {}",
            check.as_str().color(CliColors::muted()),
            format_check(passed)
        );
    }
    for failure in report.failures() {
        println!("  {}", format_error(&failure));
    }
}

/// Print one line per batch entry followed by a status summary.
pub fn print_batch_summary(results: &[(usize, Decision)], only_flagged: bool) {
    println!(
        "{:<6} {:<14} {:<10} {}",
        "#".bold(),
        "Status".bold(),
        "Conf".bold(),
        "Rationale".bold()
    );

    for (index, decision) in results {
        if only_flagged && decision.review_status == ReviewStatus::AutoPass {
            continue;
        }
        println!(
            "{:<6} {:<14} {:<10} {}",
            index.to_string().color(CliColors::muted()),
            format_status(decision.review_status),
            format_score(decision.scores.confidence),
            decision.rationale
        );
    }

    let count = |status: ReviewStatus| {
        results
            .iter()
            .filter(|(_, d)| d.review_status == status)
            .count()
    };

    println!();
    println!(
        "{}",
        format_info(&format!(
            "Evaluated {} inputs: {} auto_pass, {} needs_review, {} auto_fail",
            results.len(),
            count(ReviewStatus::AutoPass),
            count(ReviewStatus::NeedsReview),
            count(ReviewStatus::AutoFail)
        ))
    );
}

pub fn print_config(config: &VoxcheckConfig) {
    let weights = &config.scoring.weights;
    println!(
        "{}",
        "━━━ Effective Configuration ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: semantic {:.2}, intent {:.2}, entity {:.2}",
        "Weights".color(CliColors::muted()),
        weights.semantic,
        weights.intent,
        weights.entity
    );
    println!(
        "{}: {}",
        "Lexical fallback".color(CliColors::muted()),
        config.scoring.lexical_fallback
    );
    println!(
        "{}: auto_pass >= {:.2}, needs_review >= {:.2}",
        "Thresholds".color(CliColors::muted()),
        config.decision.auto_pass_threshold,
        config.decision.review_threshold
    );
    println!(
        "{}: similarity {:.2}, strict tone {}, max length {}",
        "Tolerance".color(CliColors::muted()),
        config.tolerance.similarity_threshold,
        config.tolerance.strict_tone,
        config
            .tolerance
            .max_length
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "{}: {}",
        "Tone classes".color(CliColors::muted()),
        config
            .tolerance
            .tone_cues
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "{}: key '{}', {} ordinal phrases",
        "References".color(CliColors::muted()),
        config.reference.context_key,
        config.reference.ordinals.len()
    );
    println!(
        "{}: {} ({:?})",
        "Logging".color(CliColors::muted()),
        config.logging.level,
        config.logging.format
    );
}
