//! Mechanical constraints derived from the configuration.

use super::limits::{PositionLimiter, SpeedConfig};
use super::system::SystemConfig;

/// Derived parameters computed once at startup and handed to the controller.
#[derive(Debug, Clone, Copy)]
pub struct MechanicalConstraints {
    /// Full steps per millimeter of travel.
    pub steps_per_mm: f32,

    /// Calibrated travel range.
    pub limits: PositionLimiter,

    /// Step delay bounds and policy.
    pub speed: SpeedConfig,
}

impl MechanicalConstraints {
    /// Compute constraints from a system configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        let steps_per_mm = config.motor.steps_per_mm();
        let limits =
            PositionLimiter::from_steps(config.motor.min_position, config.motor.max_position());

        Self {
            steps_per_mm,
            limits,
            speed: config.speed,
        }
    }

    /// Constraints with explicit travel limits and default speed bounds.
    pub fn with_limits(min: i32, max: i32) -> Self {
        Self {
            steps_per_mm: SystemConfig::default().motor.steps_per_mm(),
            limits: PositionLimiter::new(min, max),
            speed: SpeedConfig::default(),
        }
    }

    /// Replace the speed bounds.
    pub fn speed(mut self, speed: SpeedConfig) -> Self {
        self.speed = speed;
        self
    }
}
