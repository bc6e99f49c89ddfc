//! Motor and lead-screw calibration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Millimeters, Steps};

/// Calibration of the stepper and its lead screw.
///
/// Constants are hand-tuned per physical unit; the defaults describe a
/// 1.8° motor on a 2 mm pitch screw with 30 mm of usable stroke.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Full steps per motor revolution (200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Linear travel per screw revolution.
    #[serde(rename = "thread_pitch_mm")]
    pub thread_pitch: Millimeters,

    /// Usable stroke measured from the home position.
    #[serde(rename = "stroke_length_mm")]
    pub stroke_length: Millimeters,

    /// Lowest reachable position (home side).
    #[serde(rename = "min_position_steps")]
    pub min_position: Steps,

    /// Driver FAULT output pulls the line low when asserted.
    pub fault_active_low: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            name: String::try_from("linear_actuator").unwrap_or_default(),
            steps_per_revolution: 200,
            thread_pitch: Millimeters(2.0),
            stroke_length: Millimeters(30.0),
            min_position: Steps(0),
            fault_active_low: true,
        }
    }
}

impl MotorConfig {
    /// Full steps per millimeter of travel.
    pub fn steps_per_mm(&self) -> f32 {
        self.steps_per_revolution as f32 / self.thread_pitch.0
    }

    /// Highest reachable position: the end of the stroke.
    pub fn max_position(&self) -> Steps {
        self.min_position + Steps::from_millimeters(self.stroke_length, self.steps_per_mm())
    }
}
