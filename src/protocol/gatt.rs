//! Motor GATT service handlers.
//!
//! The BLE stack owns the attribute table and calls [`MotorService::read`]
//! and [`MotorService::write`] with raw characteristic values.

use core::ops::Deref;

use crate::config::{PositionLimiter, ProtocolConfig};
use crate::error::{ChannelError, Error, ProtocolError, Result};
use crate::motion::{Command, StatusSnapshot};

use super::codec::{self, PositionEncoding, StatusFrame};

/// Motor service UUID.
pub const MOTOR_SERVICE_UUID: &str = "87654321-abcd-ef90-1234-567890abcdef";
/// Position characteristic UUID (read/write).
pub const POSITION_CHAR_UUID: &str = "87654321-abcd-ef90-1234-567890abcd01";
/// Command characteristic UUID (write).
pub const COMMAND_CHAR_UUID: &str = "87654321-abcd-ef90-1234-567890abcd02";
/// Status characteristic UUID (read).
pub const STATUS_CHAR_UUID: &str = "87654321-abcd-ef90-1234-567890abcd03";
/// Speed characteristic UUID (read/write).
pub const SPEED_CHAR_UUID: &str = "87654321-abcd-ef90-1234-567890abcd04";
/// Limits characteristic UUID (read).
pub const LIMITS_CHAR_UUID: &str = "87654321-abcd-ef90-1234-567890abcd05";

/// Characteristics of the motor service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Characteristic {
    /// Target/current position.
    Position,
    /// Three-byte command writes.
    Command,
    /// Status frame.
    Status,
    /// Step delay.
    Speed,
    /// Travel limits.
    Limits,
}

impl Characteristic {
    /// Every characteristic, in UUID order.
    pub const ALL: [Characteristic; 5] = [
        Characteristic::Position,
        Characteristic::Command,
        Characteristic::Status,
        Characteristic::Speed,
        Characteristic::Limits,
    ];

    /// 128-bit UUID string.
    pub const fn uuid(self) -> &'static str {
        match self {
            Characteristic::Position => POSITION_CHAR_UUID,
            Characteristic::Command => COMMAND_CHAR_UUID,
            Characteristic::Status => STATUS_CHAR_UUID,
            Characteristic::Speed => SPEED_CHAR_UUID,
            Characteristic::Limits => LIMITS_CHAR_UUID,
        }
    }

    /// Look up a characteristic by UUID (case-insensitive).
    pub fn from_uuid(uuid: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.uuid().eq_ignore_ascii_case(uuid))
    }

    /// Whether reads are supported.
    pub const fn is_readable(self) -> bool {
        !matches!(self, Characteristic::Command)
    }

    /// Whether writes are supported.
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Characteristic::Position | Characteristic::Command | Characteristic::Speed
        )
    }
}

/// Value returned from a characteristic read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharValue {
    bytes: [u8; 4],
    len: usize,
}

impl CharValue {
    fn new<const N: usize>(src: [u8; N]) -> Self {
        let mut bytes = [0u8; 4];
        let len = N.min(bytes.len());
        bytes[..len].copy_from_slice(&src[..len]);
        Self { bytes, len }
    }
}

impl Deref for CharValue {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// What the service needs from the running controller.
pub trait ActuatorLink {
    /// Hand a command to the controller.
    fn submit(&self, command: Command) -> core::result::Result<(), ChannelError>;

    /// Latest published state.
    fn snapshot(&self) -> StatusSnapshot;
}

impl<L: ActuatorLink + ?Sized> ActuatorLink for &L {
    fn submit(&self, command: Command) -> core::result::Result<(), ChannelError> {
        (**self).submit(command)
    }

    fn snapshot(&self) -> StatusSnapshot {
        (**self).snapshot()
    }
}

#[cfg(feature = "std")]
impl ActuatorLink for crate::runtime::ActuatorHandle {
    fn submit(&self, command: Command) -> core::result::Result<(), ChannelError> {
        crate::runtime::ActuatorHandle::submit(self, command)
    }

    fn snapshot(&self) -> StatusSnapshot {
        self.status()
    }
}

/// Decodes characteristic accesses and forwards them to an [`ActuatorLink`].
pub struct MotorService<L> {
    link: L,
    encoding: PositionEncoding,
}

impl<L: ActuatorLink> MotorService<L> {
    /// Create a service using `encoding` on the position characteristic.
    pub fn new(link: L, encoding: PositionEncoding) -> Self {
        Self { link, encoding }
    }

    /// Create a service from the `[protocol]` configuration.
    pub fn from_config(link: L, config: &ProtocolConfig) -> Self {
        Self::new(link, config.position_encoding)
    }

    /// Position encoding in use.
    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    /// Handle a read.
    pub fn read(&self, characteristic: Characteristic) -> Result<CharValue> {
        let snapshot = self.link.snapshot();
        let limits = PositionLimiter::new(snapshot.min_position, snapshot.max_position);

        let value = match characteristic {
            Characteristic::Position => {
                CharValue::new(self.encoding.encode(snapshot.current_position, limits))
            }
            Characteristic::Status => CharValue::new(StatusFrame::from(&snapshot).encode()),
            Characteristic::Speed => CharValue::new(codec::encode_speed(snapshot.speed_delay_ms)),
            Characteristic::Limits => CharValue::new(codec::encode_limits(limits)),
            Characteristic::Command => return Err(Error::Protocol(ProtocolError::NotReadable)),
        };
        Ok(value)
    }

    /// Handle a write. Nothing is submitted if the payload is rejected.
    pub fn write(&self, characteristic: Characteristic, bytes: &[u8]) -> Result<()> {
        let command = match characteristic {
            Characteristic::Command => codec::decode_command(bytes)?,
            Characteristic::Position => {
                let snapshot = self.link.snapshot();
                let limits = PositionLimiter::new(snapshot.min_position, snapshot.max_position);
                Command::MoveAbsolute(self.encoding.decode(bytes, limits)?)
            }
            Characteristic::Speed => Command::SetSpeed(codec::decode_speed(bytes)?),
            Characteristic::Status | Characteristic::Limits => {
                return Err(Error::Protocol(ProtocolError::NotWritable));
            }
        };

        debug!("{:?} write -> {:?}", characteristic, command);
        self.link.submit(command)?;
        Ok(())
    }
}
