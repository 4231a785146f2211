use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{level_to_log_level, log_level_to_level, parse_log_level};
use std::sync::Once;

// Use this to ensure init is only called once across all tests
static INIT: Once = Once::new();

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Compact,
            file: None,
            stdout: true,
        };

        let guard = crate::logging::init(&config).unwrap();
        assert!(guard.is_none());
    });
}

#[test]
fn test_init_is_idempotent() {
    let config = LoggingConfig::default();
    assert!(crate::logging::init(&config).is_ok());
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_disabled_output_installs_nothing() {
    let config = LoggingConfig {
        stdout: false,
        file: None,
        ..Default::default()
    };
    assert!(crate::logging::init(&config).unwrap().is_none());
}

#[test]
fn test_file_logging_creates_parent_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("voxcheck.log");

    let config = LoggingConfig {
        level: LogLevel::Info,
        format: LogFormat::Json,
        file: Some(log_path.clone()),
        stdout: false,
    };

    let guard = crate::logging::init(&config).unwrap();
    assert!(guard.is_some());
    assert!(log_path.parent().unwrap().exists());
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("TRACE").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("warn").unwrap(), LogLevel::Warn);
    assert!(parse_log_level("invalid").is_err());

    for level in [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ] {
        assert_eq!(level_to_log_level(log_level_to_level(level)), level);
    }
}
