//! Motor state owned by the motion controller.

use super::sequence::{Direction, Phase};

/// Externally visible controller state.
///
/// Discriminants are the values carried in the status characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MotorStatus {
    /// Enabled, at target.
    #[default]
    Idle = 0,
    /// Stepping toward the target.
    Moving = 1,
    /// Driver fault line asserted.
    Error = 2,
    /// Driver asleep; motion commands ignored.
    Disabled = 3,
}

impl MotorStatus {
    /// Wire value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire value.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(MotorStatus::Idle),
            1 => Some(MotorStatus::Moving),
            2 => Some(MotorStatus::Error),
            3 => Some(MotorStatus::Disabled),
            _ => None,
        }
    }

    /// State name for display/debugging.
    pub const fn name(self) -> &'static str {
        match self {
            MotorStatus::Idle => "Idle",
            MotorStatus::Moving => "Moving",
            MotorStatus::Error => "Error",
            MotorStatus::Disabled => "Disabled",
        }
    }
}

/// Mutable motor state.
///
/// Invariants kept by the controller after every tick:
/// - `min_position <= current_position <= max_position`
/// - `moving` implies `current_position != target_position`, `enabled` and no fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorState {
    /// Position reached so far, in steps.
    pub current_position: i32,
    /// Position being driven toward, already clamped.
    pub target_position: i32,
    /// Lower travel limit.
    pub min_position: i32,
    /// Upper travel limit.
    pub max_position: i32,
    /// Delay between steps in milliseconds.
    pub speed_delay_ms: u16,
    /// Current coil phase.
    pub phase: Phase,
    /// Whether a move is in progress.
    pub moving: bool,
    /// Driver power state.
    pub enabled: bool,
    /// Direction of the last step.
    pub direction: Direction,
    /// Fault line level seen on the last tick.
    pub fault: bool,
}

impl MotorState {
    /// Fresh state at position 0 (or the nearest limit), driver enabled.
    pub fn new(min_position: i32, max_position: i32, speed_delay_ms: u16) -> Self {
        let home = 0.max(min_position).min(max_position);
        Self {
            current_position: home,
            target_position: home,
            min_position,
            max_position,
            speed_delay_ms,
            phase: Phase::default(),
            moving: false,
            enabled: true,
            direction: Direction::Forward,
            fault: false,
        }
    }

    /// Status derived from the state flags.
    pub fn status(&self) -> MotorStatus {
        if self.fault {
            MotorStatus::Error
        } else if !self.enabled {
            MotorStatus::Disabled
        } else if self.moving {
            MotorStatus::Moving
        } else {
            MotorStatus::Idle
        }
    }
}
