//! Integration tests for the voxcheck CLI
//!
//! These tests exercise the library surface the binary is built from:
//! input parsing, configuration loading and batch evaluation.

use std::fs;
use tempfile::TempDir;
use voxcheck::models::ReviewStatus;
use voxcheck_cli::handlers::evaluate_batch;
use voxcheck_cli::{VoxcheckCliContext, load_config, parse_input, parse_inputs, read_inputs};

fn passing_case(response: &str) -> serde_json::Value {
    serde_json::json!({
        "actual_response": response,
        "actual_entities": {"intent": "get_weather", "confidence": 0.9, "city": "NY"},
        "expected": {
            "intent": "get_weather",
            "entities": {"city": "NY"},
            "response": response
        }
    })
}

#[test]
fn test_parse_single_input() {
    let input = parse_input(&passing_case("It is sunny in NY").to_string()).unwrap();
    assert_eq!(input.actual_response, "It is sunny in NY");
    assert_eq!(input.expected.intent.as_deref(), Some("get_weather"));

    assert!(parse_input("[1, 2]").is_err());
    assert!(parse_input("not json").is_err());
}

#[test]
fn test_parse_batch_shapes() {
    let array = serde_json::json!([passing_case("a"), passing_case("b")]);
    assert_eq!(parse_inputs(&array.to_string()).unwrap().len(), 2);

    let object = serde_json::json!({"inputs": [passing_case("a")]});
    assert_eq!(parse_inputs(&object.to_string()).unwrap().len(), 1);

    assert!(parse_inputs("[]").is_err());
    assert!(parse_inputs(r#"{"cases": []}"#).is_err());
    assert!(parse_inputs("42").is_err());
}

#[test]
fn test_batch_reports_bad_entry_index() {
    let batch = serde_json::json!([passing_case("a"), {"actual_response": 5}]);
    let err = parse_inputs(&batch.to_string()).unwrap_err();
    assert!(err.to_string().contains("Input 1"));
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("voxcheck.toml");
    fs::write(
        &path,
        r#"
[decision]
auto_pass_threshold = 0.9
review_threshold = 0.5
"#,
    )
    .unwrap();

    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.decision.auto_pass_threshold, 0.9);
    assert_eq!(config.decision.review_threshold, 0.5);
}

#[test]
fn test_load_config_rejects_bad_weights() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("voxcheck.json");
    fs::write(
        &path,
        r#"{"scoring": {"weights": {"semantic": 0.6, "intent": 0.6, "entity": 0.2}}}"#,
    )
    .unwrap();

    assert!(load_config(Some(path.as_path())).is_err());
}

#[tokio::test]
async fn test_batch_evaluation_keeps_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("batch.json");
    let batch = serde_json::json!([
        passing_case("It is sunny in NY"),
        {"actual_response": "", "expected": {"response": "It is sunny"}},
        passing_case("It is raining in NY"),
    ]);
    fs::write(&path, batch.to_string()).unwrap();

    let inputs = read_inputs(&path).unwrap();
    let ctx = VoxcheckCliContext::new(voxcheck::config::VoxcheckConfig::default()).unwrap();
    let results = evaluate_batch(&ctx.engine, &inputs, None).await;

    let indices: Vec<usize> = results.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(results[0].1.review_status, ReviewStatus::AutoPass);
    assert_eq!(results[1].1.review_status, ReviewStatus::NeedsReview);
    assert_eq!(results[2].1.review_status, ReviewStatus::AutoPass);
}
