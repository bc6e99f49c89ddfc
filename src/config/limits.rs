//! Travel limits and step-delay bounds.

use serde::Deserialize;

use super::units::Steps;

/// Clamps requested targets into the calibrated travel range.
///
/// Out-of-range targets are never rejected; they land on the nearest limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionLimiter {
    min: i32,
    max: i32,
}

impl PositionLimiter {
    /// Create a limiter for `[min, max]`.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Create a limiter from step-typed bounds.
    pub fn from_steps(min: Steps, max: Steps) -> Self {
        Self::new(min.0, max.0)
    }

    /// Lowest reachable position.
    #[inline]
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Highest reachable position.
    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Width of the travel range in steps.
    ///
    /// Widened so the full `i32` range does not overflow.
    #[inline]
    pub fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    /// Check if a position is within limits.
    #[inline]
    pub fn contains(&self, position: i32) -> bool {
        position >= self.min && position <= self.max
    }

    /// `max(min, min(max, p))`.
    #[inline]
    pub fn clamp(&self, position: i32) -> i32 {
        position.max(self.min).min(self.max)
    }

    /// Clamp `current + delta` without overflowing.
    #[inline]
    pub fn clamp_relative(&self, current: i32, delta: i32) -> i32 {
        self.clamp(current.saturating_add(delta))
    }
}

/// Policy for step delays outside the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Clamp to the nearest bound.
    #[default]
    Clamp,
    /// Store the requested delay unchanged.
    Passthrough,
}

/// Step delay configuration (`[speed]` table).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Delay between steps at startup.
    pub default_delay_ms: u16,
    /// Shortest allowed delay (fastest stepping).
    pub min_delay_ms: u16,
    /// Longest allowed delay (slowest stepping).
    pub max_delay_ms: u16,
    /// What to do with out-of-range `SetSpeed` requests.
    pub policy: SpeedPolicy,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: 10,
            min_delay_ms: 1,
            max_delay_ms: 1000,
            policy: SpeedPolicy::Clamp,
        }
    }
}

impl SpeedConfig {
    /// Check if bounds are usable (1 <= min <= max).
    pub fn is_valid(&self) -> bool {
        self.min_delay_ms >= 1 && self.min_delay_ms <= self.max_delay_ms
    }

    /// Check if a delay is within bounds.
    pub fn contains(&self, delay_ms: u16) -> bool {
        delay_ms >= self.min_delay_ms && delay_ms <= self.max_delay_ms
    }

    /// Apply the speed policy to a requested delay.
    pub fn apply(&self, delay_ms: u16) -> u16 {
        match self.policy {
            SpeedPolicy::Passthrough => delay_ms,
            SpeedPolicy::Clamp => delay_ms.max(self.min_delay_ms).min(self.max_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        let limiter = PositionLimiter::new(0, 2000);

        assert_eq!(limiter.clamp(2500), 2000);
        assert_eq!(limiter.clamp(-1), 0);
        assert_eq!(limiter.clamp(1234), 1234);
        assert_eq!(limiter.clamp(0), 0);
        assert_eq!(limiter.clamp(2000), 2000);
    }

    #[test]
    fn test_clamp_relative_saturates() {
        let limiter = PositionLimiter::new(-100, 100);

        assert_eq!(limiter.clamp_relative(50, 80), 100);
        assert_eq!(limiter.clamp_relative(i32::MAX, 1), 100);
        assert_eq!(limiter.clamp_relative(-50, i32::MIN), -100);
    }

    #[test]
    fn test_swapped_bounds() {
        let limiter = PositionLimiter::new(2000, 0);
        assert_eq!(limiter.min(), 0);
        assert_eq!(limiter.max(), 2000);
        assert_eq!(limiter.span(), 2000);
    }

    #[test]
    fn test_span_of_full_range() {
        let limiter = PositionLimiter::new(i32::MIN, i32::MAX);
        assert_eq!(limiter.span(), i64::from(u32::MAX));
    }

    #[test]
    fn test_speed_clamp_policy() {
        let speed = SpeedConfig::default();

        assert_eq!(speed.apply(0), 1);
        assert_eq!(speed.apply(5), 5);
        assert_eq!(speed.apply(65535), 1000);
    }

    #[test]
    fn test_speed_passthrough_policy() {
        let speed = SpeedConfig {
            policy: SpeedPolicy::Passthrough,
            ..SpeedConfig::default()
        };

        assert_eq!(speed.apply(0), 0);
        assert_eq!(speed.apply(65535), 65535);
    }
}
