//! Byte layouts of the motor characteristics.
//!
//! All multi-byte fields are little-endian.

use serde::Deserialize;

use crate::config::PositionLimiter;
use crate::error::ProtocolError;
use crate::motion::{Command, StatusSnapshot};
use crate::motor::MotorStatus;

/// Command write: `[opcode][param_lo][param_hi]`.
pub const COMMAND_LEN: usize = 3;
/// Position read/write: i16.
pub const POSITION_LEN: usize = 2;
/// Status read: `[status][pos_lo][pos_hi][fault]`.
pub const STATUS_LEN: usize = 4;
/// Speed read/write: u16 milliseconds.
pub const SPEED_LEN: usize = 2;
/// Limits read: `[min_lo][min_hi][max_lo][max_hi]`.
pub const LIMITS_LEN: usize = 4;

/// Command opcodes.
pub mod opcode {
    /// Halt.
    pub const STOP: u8 = 0;
    /// Absolute move, parameter is the target.
    pub const MOVE_ABSOLUTE: u8 = 1;
    /// Relative move, parameter is the signed delta.
    pub const MOVE_RELATIVE: u8 = 2;
    /// Return to 0.
    pub const HOME: u8 = 3;
    /// Step delay, parameter read as unsigned.
    pub const SET_SPEED: u8 = 4;
    /// Wake the driver.
    pub const ENABLE: u8 = 5;
    /// Sleep the driver.
    pub const DISABLE: u8 = 6;
}

fn expect_len(bytes: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(ProtocolError::InvalidLength {
            expected,
            actual: bytes.len(),
        })
    }
}

/// Saturate a step position into the 16-bit wire range.
#[inline]
fn wire_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Decode a command characteristic write.
pub fn decode_command(bytes: &[u8]) -> Result<Command, ProtocolError> {
    expect_len(bytes, COMMAND_LEN)?;
    let param = i16::from_le_bytes([bytes[1], bytes[2]]);

    let command = match bytes[0] {
        opcode::STOP => Command::Stop,
        opcode::MOVE_ABSOLUTE => Command::MoveAbsolute(i32::from(param)),
        opcode::MOVE_RELATIVE => Command::MoveRelative(i32::from(param)),
        opcode::HOME => Command::Home,
        opcode::SET_SPEED => Command::SetSpeed(param as u16),
        opcode::ENABLE => Command::Enable,
        opcode::DISABLE => Command::Disable,
        other => return Err(ProtocolError::UnknownOpcode(other)),
    };
    Ok(command)
}

/// Encode a command as a client would write it.
///
/// Parameters outside the 16-bit range saturate.
pub fn encode_command(command: Command) -> [u8; COMMAND_LEN] {
    let (op, param) = match command {
        Command::Stop => (opcode::STOP, 0),
        Command::MoveAbsolute(p) => (opcode::MOVE_ABSOLUTE, wire_i16(p)),
        Command::MoveRelative(d) => (opcode::MOVE_RELATIVE, wire_i16(d)),
        Command::Home => (opcode::HOME, 0),
        Command::SetSpeed(ms) => (opcode::SET_SPEED, ms as i16),
        Command::Enable => (opcode::ENABLE, 0),
        Command::Disable => (opcode::DISABLE, 0),
    };
    let [lo, hi] = param.to_le_bytes();
    [op, lo, hi]
}

/// Contents of the status characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFrame {
    /// Controller status.
    pub status: MotorStatus,
    /// Current position in steps.
    pub position: i16,
    /// Fault line asserted.
    pub fault: bool,
}

impl StatusFrame {
    /// Serialize to `[status][pos_lo][pos_hi][fault]`.
    pub fn encode(&self) -> [u8; STATUS_LEN] {
        let [lo, hi] = self.position.to_le_bytes();
        [self.status.as_u8(), lo, hi, u8::from(self.fault)]
    }

    /// Parse a status read.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        expect_len(bytes, STATUS_LEN)?;
        let status = MotorStatus::from_u8(bytes[0]).ok_or(ProtocolError::UnknownStatus(bytes[0]))?;
        Ok(Self {
            status,
            position: i16::from_le_bytes([bytes[1], bytes[2]]),
            fault: bytes[3] != 0,
        })
    }
}

impl From<&StatusSnapshot> for StatusFrame {
    fn from(snapshot: &StatusSnapshot) -> Self {
        Self {
            status: snapshot.status,
            position: wire_i16(snapshot.current_position),
            fault: snapshot.fault,
        }
    }
}

/// Encode a step delay.
pub fn encode_speed(delay_ms: u16) -> [u8; SPEED_LEN] {
    delay_ms.to_le_bytes()
}

/// Decode a speed characteristic write.
pub fn decode_speed(bytes: &[u8]) -> Result<u16, ProtocolError> {
    expect_len(bytes, SPEED_LEN)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Encode the travel limits.
pub fn encode_limits(limits: PositionLimiter) -> [u8; LIMITS_LEN] {
    let [min_lo, min_hi] = wire_i16(limits.min()).to_le_bytes();
    let [max_lo, max_hi] = wire_i16(limits.max()).to_le_bytes();
    [min_lo, min_hi, max_lo, max_hi]
}

/// Decode a limits read.
pub fn decode_limits(bytes: &[u8]) -> Result<PositionLimiter, ProtocolError> {
    expect_len(bytes, LIMITS_LEN)?;
    let min = i16::from_le_bytes([bytes[0], bytes[1]]);
    let max = i16::from_le_bytes([bytes[2], bytes[3]]);
    Ok(PositionLimiter::new(i32::from(min), i32::from(max)))
}

/// Scale used on the position characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum PositionEncoding {
    /// Raw step positions.
    #[default]
    Steps,
    /// 0 at the lower limit, 100 at the upper limit.
    Percent,
}

impl PositionEncoding {
    /// Convert a wire value to a step position.
    ///
    /// Percent values are not clamped here; the controller clamps the target.
    pub fn to_steps(self, value: i16, limits: PositionLimiter) -> i32 {
        match self {
            PositionEncoding::Steps => i32::from(value),
            PositionEncoding::Percent => {
                let offset = i64::from(value) * limits.span() / 100;
                (i64::from(limits.min()) + offset).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
        }
    }

    /// Convert a step position to its wire value, truncating toward zero.
    pub fn from_steps(self, steps: i32, limits: PositionLimiter) -> i16 {
        match self {
            PositionEncoding::Steps => wire_i16(steps),
            PositionEncoding::Percent => {
                if limits.span() == 0 {
                    return 0;
                }
                let pct = (i64::from(steps) - i64::from(limits.min())) * 100 / limits.span();
                pct.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
            }
        }
    }

    /// Decode a position characteristic write into steps.
    pub fn decode(self, bytes: &[u8], limits: PositionLimiter) -> Result<i32, ProtocolError> {
        expect_len(bytes, POSITION_LEN)?;
        Ok(self.to_steps(i16::from_le_bytes([bytes[0], bytes[1]]), limits))
    }

    /// Encode a step position for a position characteristic read.
    pub fn encode(self, steps: i32, limits: PositionLimiter) -> [u8; POSITION_LEN] {
        self.from_steps(steps, limits).to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_move_absolute() {
        assert_eq!(decode_command(&[1, 0xE8, 0x03]), Ok(Command::MoveAbsolute(1000)));
    }

    #[test]
    fn test_decode_negative_relative() {
        assert_eq!(decode_command(&[2, 0x9C, 0xFF]), Ok(Command::MoveRelative(-100)));
    }

    #[test]
    fn test_set_speed_reinterprets_parameter() {
        assert_eq!(decode_command(&[4, 0x0A, 0x00]), Ok(Command::SetSpeed(10)));
        assert_eq!(decode_command(&[4, 0xFF, 0xFF]), Ok(Command::SetSpeed(65535)));
    }

    #[test]
    fn test_parameterless_opcodes_ignore_param() {
        assert_eq!(decode_command(&[0, 0x12, 0x34]), Ok(Command::Stop));
        assert_eq!(decode_command(&[3, 0, 0]), Ok(Command::Home));
        assert_eq!(decode_command(&[5, 0, 0]), Ok(Command::Enable));
        assert_eq!(decode_command(&[6, 0, 0]), Ok(Command::Disable));
    }

    #[test]
    fn test_rejects_bad_commands() {
        assert_eq!(
            decode_command(&[1, 0]),
            Err(ProtocolError::InvalidLength { expected: 3, actual: 2 })
        );
        assert_eq!(
            decode_command(&[1, 0, 0, 0]),
            Err(ProtocolError::InvalidLength { expected: 3, actual: 4 })
        );
        assert_eq!(decode_command(&[7, 0, 0]), Err(ProtocolError::UnknownOpcode(7)));
    }

    #[test]
    fn test_status_frame_layout() {
        let frame = StatusFrame {
            status: MotorStatus::Moving,
            position: 1500,
            fault: false,
        };
        assert_eq!(frame.encode(), [1, 0xDC, 0x05, 0]);
        assert_eq!(StatusFrame::decode(&frame.encode()), Ok(frame));
        assert_eq!(StatusFrame::decode(&[9, 0, 0, 0]), Err(ProtocolError::UnknownStatus(9)));
    }

    #[test]
    fn test_percent_encoding() {
        let limits = PositionLimiter::new(0, 2000);
        let enc = PositionEncoding::Percent;

        assert_eq!(enc.to_steps(50, limits), 1000);
        assert_eq!(enc.to_steps(100, limits), 2000);
        assert_eq!(enc.from_steps(1999, limits), 99);
        assert_eq!(enc.from_steps(2000, limits), 100);
        assert_eq!(enc.decode(&[25, 0], limits), Ok(500));
    }

    #[test]
    fn test_percent_with_offset_limits() {
        let limits = PositionLimiter::new(-1000, 1000);
        let enc = PositionEncoding::Percent;

        assert_eq!(enc.to_steps(0, limits), -1000);
        assert_eq!(enc.to_steps(50, limits), 0);
        assert_eq!(enc.from_steps(0, limits), 50);
    }

    #[test]
    fn test_percent_over_full_i32_range() {
        let limits = PositionLimiter::new(i32::MIN, i32::MAX);
        let enc = PositionEncoding::Percent;

        assert_eq!(enc.to_steps(0, limits), i32::MIN);
        assert_eq!(enc.to_steps(100, limits), i32::MAX);
        assert_eq!(enc.from_steps(i32::MAX, limits), 100);
        assert_eq!(enc.from_steps(0, limits), 50);
    }

    #[test]
    fn test_steps_encoding_saturates() {
        let limits = PositionLimiter::new(0, 2000);
        assert_eq!(PositionEncoding::Steps.encode(40_000, limits), i16::MAX.to_le_bytes());
        assert_eq!(PositionEncoding::Steps.decode(&[0x10, 0x27], limits), Ok(10_000));
    }

    #[test]
    fn test_limits_layout() {
        let limits = PositionLimiter::new(0, 3000);
        assert_eq!(encode_limits(limits), [0, 0, 0xB8, 0x0B]);
        assert_eq!(decode_limits(&encode_limits(limits)), Ok(limits));
    }
}
