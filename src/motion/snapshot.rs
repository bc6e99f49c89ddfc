//! Read-only copies of the controller state.

use crate::motor::{Direction, MotorState, MotorStatus};

/// Everything a reader may observe about the motor, taken in one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Derived status.
    pub status: MotorStatus,
    /// Position reached so far.
    pub current_position: i32,
    /// Position being driven toward.
    pub target_position: i32,
    /// Fault line level on the last tick.
    pub fault: bool,
    /// Driver power state.
    pub enabled: bool,
    /// Move in progress.
    pub moving: bool,
    /// Coil phase index (0..4).
    pub phase: u8,
    /// Direction of the last step.
    pub direction: Direction,
    /// Delay between steps in milliseconds.
    pub speed_delay_ms: u16,
    /// Lower travel limit.
    pub min_position: i32,
    /// Upper travel limit.
    pub max_position: i32,
}

impl From<&MotorState> for StatusSnapshot {
    fn from(state: &MotorState) -> Self {
        Self {
            status: state.status(),
            current_position: state.current_position,
            target_position: state.target_position,
            fault: state.fault,
            enabled: state.enabled,
            moving: state.moving,
            phase: state.phase.index(),
            direction: state.direction,
            speed_delay_ms: state.speed_delay_ms,
            min_position: state.min_position,
            max_position: state.max_position,
        }
    }
}

#[cfg(feature = "std")]
pub use cell::SnapshotCell;

#[cfg(feature = "std")]
mod cell {
    use std::sync::Arc;

    use parking_lot::RwLock;

    use super::StatusSnapshot;

    /// Shared slot holding the most recently published snapshot.
    ///
    /// The controller thread is the only writer; readers always get a copy
    /// taken under the lock, never a half-updated value.
    #[derive(Debug, Clone)]
    pub struct SnapshotCell {
        inner: Arc<RwLock<StatusSnapshot>>,
    }

    impl SnapshotCell {
        /// Create a cell holding `initial`.
        pub fn new(initial: StatusSnapshot) -> Self {
            Self {
                inner: Arc::new(RwLock::new(initial)),
            }
        }

        /// Replace the published snapshot.
        pub fn publish(&self, snapshot: StatusSnapshot) {
            *self.inner.write() = snapshot;
        }

        /// Copy of the latest snapshot.
        pub fn load(&self) -> StatusSnapshot {
            *self.inner.read()
        }
    }
}
