//! Configuration module for the actuator core.
//!
//! Provides calibration, speed bounds, and loop timing, loaded from TOML
//! files (with `std` feature) or built in code.

mod limits;
mod mechanical;
mod motor;
mod system;
mod timing;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use limits::{PositionLimiter, SpeedConfig, SpeedPolicy};
pub use mechanical::MechanicalConstraints;
pub use motor::MotorConfig;
pub use system::{ProtocolConfig, SystemConfig};
pub use timing::TimingConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, Steps};
