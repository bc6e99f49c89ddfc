//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SpeedConfig, SystemConfig, TimingConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Calibration constants are positive
/// - Derived travel limits are non-empty and fit the 16-bit wire format
/// - Speed bounds are ordered and contain the default delay
/// - Command submission has a non-zero timeout
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_motor(&config.motor)?;
    validate_speed(&config.speed)?;
    validate_timing(&config.timing)?;
    Ok(())
}

fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if config.thread_pitch.0.is_nan() || config.thread_pitch.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidThreadPitch(config.thread_pitch.0)));
    }

    if config.stroke_length.0.is_nan() || config.stroke_length.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStrokeLength(config.stroke_length.0)));
    }

    let min = config.min_position.0;
    let max = config.max_position().0;
    let wire = i16::MIN as i32..=i16::MAX as i32;
    if min >= max || !wire.contains(&min) || !wire.contains(&max) {
        return Err(Error::Config(ConfigError::InvalidTravelLimits { min, max }));
    }

    Ok(())
}

fn validate_speed(config: &SpeedConfig) -> Result<()> {
    if !config.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSpeedBounds {
            min: config.min_delay_ms,
            max: config.max_delay_ms,
        }));
    }

    if !config.contains(config.default_delay_ms) {
        return Err(Error::Config(ConfigError::DefaultSpeedOutOfBounds(
            config.default_delay_ms,
        )));
    }

    Ok(())
}

fn validate_timing(config: &TimingConfig) -> Result<()> {
    if config.submit_timeout_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidSubmitTimeout));
    }
    Ok(())
}
