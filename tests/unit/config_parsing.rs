//! Unit tests for configuration parsing.

use ble_actuator::config::{load_config, parse_config, SpeedPolicy};
use ble_actuator::error::{ConfigError, Error};
use ble_actuator::PositionEncoding;

/// Test that an empty document yields the reference calibration.
#[test]
fn test_empty_document_uses_reference_unit() {
    let config = parse_config("").expect("empty config should parse");

    assert_eq!(config.motor.name.as_str(), "linear_actuator");
    assert_eq!(config.motor.max_position().value(), 3000);
    assert_eq!(config.speed.min_delay_ms, 1);
    assert_eq!(config.speed.max_delay_ms, 1000);
    assert_eq!(config.speed.policy, SpeedPolicy::Clamp);
    assert_eq!(config.timing.poll_timeout_ms, 10);
    assert_eq!(config.timing.idle_interval_ms, 100);
    assert_eq!(config.timing.submit_timeout_ms, 100);
}

/// Test a partial `[motor]` table keeps the other defaults.
#[test]
fn test_partial_motor_table() {
    let config = parse_config(
        r#"
[motor]
thread_pitch_mm = 8.0
fault_active_low = false
"#,
    )
    .expect("partial config should parse");

    assert!(!config.motor.fault_active_low);
    assert_eq!(config.motor.steps_per_revolution, 200);
    // 25 steps/mm over 30 mm.
    assert_eq!(config.motor.max_position().value(), 750);
}

/// Test unknown encodings are rejected at parse time.
#[test]
fn test_unknown_position_encoding() {
    let result = parse_config(
        r#"
[protocol]
position_encoding = "degrees"
"#,
    );
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test loading from a file on disk.
#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("ble-actuator-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[motor]
name = "bench"

[protocol]
position_encoding = "percent"
"#,
    )
    .expect("write temp config");

    let config = load_config(&path);
    let _ = std::fs::remove_file(&path);

    let config = config.expect("config should load");
    assert_eq!(config.motor.name.as_str(), "bench");
    assert_eq!(config.protocol.position_encoding, PositionEncoding::Percent);
}

/// Test a missing file surfaces an I/O error.
#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/ble-actuator.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
