//! Motion module for the actuator.
//!
//! Provides the command set, the tick-driven controller, and status snapshots.

mod command;
mod controller;
mod snapshot;

pub use command::Command;
pub use controller::{MotionController, Tick};
pub use snapshot::StatusSnapshot;
#[cfg(feature = "std")]
pub use snapshot::SnapshotCell;
