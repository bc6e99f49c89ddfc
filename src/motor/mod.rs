//! Motor module for the actuator.
//!
//! Coil sequencing, the H-bridge driver seam, and the state owned by the
//! motion controller.

mod builder;
mod driver;
pub mod sequence;
#[cfg(feature = "std")]
mod simulated;
pub mod state;

pub use builder::CoilDriverBuilder;
pub use driver::{CoilDriver, MotorDriver};
pub use self_test::{run_sweep, SweepReport};
pub use sequence::{CoilPattern, Direction, Phase, StepSequencer};
#[cfg(feature = "std")]
pub use simulated::{DriverProbe, SimulatedDriver};
pub use state::{MotorState, MotorStatus};
