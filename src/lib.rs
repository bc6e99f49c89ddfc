//! # ble-actuator
//!
//! Motion core for a BLE-controlled linear actuator driven by a 2-phase
//! stepper through a DRV8833-class H-bridge, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Tick-driven controller**: one command, one fault poll, at most one step per tick
//! - **Travel limits**: every target is clamped into the calibrated range
//! - **Fault safety**: the driver's FAULT line halts motion and releases the coils
//! - **embedded-hal 1.0**: `OutputPin` for the bridge inputs and SLEEP, `InputPin` for FAULT
//! - **no_std compatible**: controller, codec and coil driver work without the standard library
//! - **GATT handlers**: byte-level encode/decode of the motor service characteristics
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ble_actuator::{Actuator, Command, MotionController, SystemConfig, ThreadDelay};
//!
//! let config: SystemConfig = ble_actuator::load_config("actuator.toml")?;
//!
//! let driver = CoilDriverBuilder::new()
//!     .coil_a(ain1, ain2)
//!     .coil_b(bin1, bin2)
//!     .sleep_pin(sleep)
//!     .fault_pin(fault)
//!     .from_motor_config(&config.motor)
//!     .build()?;
//!
//! let controller = MotionController::from_config(driver, &config)?;
//! let actuator = Actuator::spawn(controller, ThreadDelay)?;
//!
//! let handle = actuator.handle();
//! handle.submit(Command::MoveAbsolute(1500))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): threaded runtime, TOML loading, `tracing` logs
//! - `defmt`: defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod protocol;
#[cfg(feature = "std")]
pub mod runtime;

// Re-exports for ergonomic API
pub use config::{MechanicalConstraints, MotorConfig, PositionLimiter, SystemConfig, validate_config};
pub use error::{ChannelError, Error, ProtocolError, Result};
pub use motion::{Command, MotionController, StatusSnapshot, Tick};
pub use motor::{CoilDriver, CoilDriverBuilder, MotorDriver, MotorStatus, StepSequencer};
pub use protocol::{Characteristic, MotorService, PositionEncoding};

// Configuration loading and runtime (std only)
#[cfg(feature = "std")]
pub use config::load_config;
#[cfg(feature = "std")]
pub use runtime::{Actuator, ActuatorHandle, ThreadDelay};

// Unit types
pub use config::units::{Millimeters, Steps};
