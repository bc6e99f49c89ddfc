//! Unit test harness for the actuator core.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod config_validation;
mod protocol_properties;
