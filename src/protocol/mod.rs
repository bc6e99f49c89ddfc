//! Wire protocol for the motor GATT service.

pub mod codec;
mod gatt;

pub use codec::{decode_command, encode_command, PositionEncoding, StatusFrame};
pub use gatt::{
    ActuatorLink, CharValue, Characteristic, MotorService, COMMAND_CHAR_UUID, LIMITS_CHAR_UUID,
    MOTOR_SERVICE_UUID, POSITION_CHAR_UUID, SPEED_CHAR_UUID, STATUS_CHAR_UUID,
};
