//! Unit types for physical quantities.
//!
//! Keeps linear travel in millimeters and motor position in steps apart so
//! calibration math cannot silently mix them.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Linear travel in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Actuator position in full steps (absolute from the home position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Steps(pub i32);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Create from millimeters, truncating partial steps toward zero.
    #[inline]
    pub fn from_millimeters(mm: Millimeters, steps_per_mm: f32) -> Self {
        Self(libm::truncf(mm.0 * steps_per_mm) as i32)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_from_millimeters() {
        // 200 steps/rev over a 2 mm pitch
        assert_eq!(Steps::from_millimeters(Millimeters(30.0), 100.0), Steps(3000));
        assert_eq!(Steps::from_millimeters(Millimeters(0.019), 100.0), Steps(1));
    }

    #[test]
    fn test_steps_arithmetic_saturates() {
        assert_eq!(Steps(i32::MAX) + Steps(1), Steps(i32::MAX));
        assert_eq!(Steps(10) - Steps(25), Steps(-15));
    }
}
