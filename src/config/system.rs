//! System configuration - root configuration structure.

use serde::Deserialize;

use crate::protocol::PositionEncoding;

use super::limits::SpeedConfig;
use super::motor::MotorConfig;
use super::timing::TimingConfig;

/// Root configuration structure from TOML.
///
/// Every table is optional; an empty document yields the reference unit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Motor and lead-screw calibration.
    pub motor: MotorConfig,

    /// Step delay bounds.
    pub speed: SpeedConfig,

    /// Control loop intervals.
    pub timing: TimingConfig,

    /// Characteristic encoding options.
    pub protocol: ProtocolConfig,
}

/// Wire encoding options (`[protocol]` table).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Scale used by the position characteristic.
    pub position_encoding: PositionEncoding,
}
