//! Commands accepted by the motion controller.

/// A single request to the controller, consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Halt at the current position.
    Stop,
    /// Move to an absolute step position (clamped).
    MoveAbsolute(i32),
    /// Move by a signed number of steps (clamped).
    MoveRelative(i32),
    /// Move to position 0 (clamped).
    Home,
    /// Set the delay between steps in milliseconds.
    SetSpeed(u16),
    /// Wake the driver.
    Enable,
    /// Halt, release the coils and put the driver to sleep.
    Disable,
}

impl Command {
    /// Whether the command sets a new target.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Command::MoveAbsolute(_) | Command::MoveRelative(_) | Command::Home
        )
    }
}
