//! Unit tests for configuration validation.

use ble_actuator::config::{parse_config, validate_config, SystemConfig};
use ble_actuator::error::{ConfigError, Error};

/// Test validation of the default configuration.
#[test]
fn test_default_config_passes_validation() {
    assert!(validate_config(&SystemConfig::default()).is_ok());
}

/// Test validation fails for zero steps per revolution.
#[test]
fn test_zero_steps_per_revolution() {
    let result = parse_config(
        r#"
[motor]
steps_per_revolution = 0
"#,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    ));
}

/// Test validation fails for a negative stroke.
#[test]
fn test_negative_stroke() {
    let result = parse_config(
        r#"
[motor]
stroke_length_mm = -5.0
"#,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStrokeLength(_)))
    ));
}

/// Test validation fails when the travel range leaves the 16-bit wire range.
#[test]
fn test_min_position_below_wire_range() {
    let result = parse_config(
        r#"
[motor]
min_position_steps = -40000
"#,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTravelLimits { min: -40000, .. }))
    ));
}

/// Test validation fails for a zero minimum delay.
#[test]
fn test_zero_min_delay() {
    let result = parse_config(
        r#"
[speed]
min_delay_ms = 0
"#,
    );
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidSpeedBounds { min: 0, max: 1000 }))
    ));
}

/// Test the error message names the offending value.
#[test]
fn test_error_display() {
    let err = parse_config("[speed]\ndefault_delay_ms = 2000\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Default step delay 2000 ms is outside the speed bounds"
    );
}
