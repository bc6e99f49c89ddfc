//! Error types for the actuator core.
//!
//! Provides unified error handling across configuration, coil driving,
//! the wire protocol, and the command channel.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all actuator operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor driver or controller error
    Motor(MotorError),
    /// Characteristic payload rejected at the protocol boundary
    Protocol(ProtocolError),
    /// Command could not be handed to the controller
    Channel(ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// Thread pitch must be > 0
    InvalidThreadPitch(f32),
    /// Stroke length must be > 0
    InvalidStrokeLength(f32),
    /// Derived travel limits are empty or do not fit the 16-bit wire format
    InvalidTravelLimits {
        /// Minimum position in steps
        min: i32,
        /// Maximum position in steps
        max: i32,
    },
    /// Speed bounds are inverted or start at zero
    InvalidSpeedBounds {
        /// Shortest allowed step delay
        min: u16,
        /// Longest allowed step delay
        max: u16,
    },
    /// Default step delay lies outside the speed bounds
    DefaultSpeedOutOfBounds(u16),
    /// Command submission timeout must be > 0
    InvalidSubmitTimeout,
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor driver and controller errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// The control loop thread could not be started
    SpawnFailed,
    /// The control loop thread panicked
    LoopPanicked,
}

/// Wire-level rejection of a characteristic access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload has the wrong number of bytes
    InvalidLength {
        /// Length the characteristic requires
        expected: usize,
        /// Length that was received
        actual: usize,
    },
    /// Command opcode outside the known table
    UnknownOpcode(u8),
    /// Status byte outside the known table
    UnknownStatus(u8),
    /// Characteristic does not accept writes
    NotWritable,
    /// Characteristic does not support reads
    NotReadable,
}

/// Command hand-off errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// Queue stayed full for the whole submission timeout; command dropped
    Busy,
    /// Controller has shut down
    Closed,
}

impl ChannelError {
    /// Whether the caller may retry the same command later.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChannelError::Busy)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Protocol(e) => write!(f, "Protocol error: {}", e),
            Error::Channel(e) => write!(f, "Channel error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidThreadPitch(v) => write!(f, "Invalid thread pitch: {} mm. Must be > 0", v),
            ConfigError::InvalidStrokeLength(v) => write!(f, "Invalid stroke length: {} mm. Must be > 0", v),
            ConfigError::InvalidTravelLimits { min, max } => write!(
                f,
                "Invalid travel limits: [{}, {}] must be non-empty and within the 16-bit range",
                min, max
            ),
            ConfigError::InvalidSpeedBounds { min, max } => {
                write!(f, "Invalid speed bounds: min ({}) must be >= 1 and <= max ({})", min, max)
            }
            ConfigError::DefaultSpeedOutOfBounds(v) => {
                write!(f, "Default step delay {} ms is outside the speed bounds", v)
            }
            ConfigError::InvalidSubmitTimeout => write!(f, "Submit timeout must be > 0 ms"),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::SpawnFailed => write!(f, "Failed to start the control loop"),
            MotorError::LoopPanicked => write!(f, "Control loop panicked"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidLength { expected, actual } => {
                write!(f, "Invalid payload length {}, expected {}", actual, expected)
            }
            ProtocolError::UnknownOpcode(op) => write!(f, "Unknown command opcode: {}", op),
            ProtocolError::UnknownStatus(v) => write!(f, "Unknown status value: {}", v),
            ProtocolError::NotWritable => write!(f, "Characteristic is read-only"),
            ProtocolError::NotReadable => write!(f, "Characteristic is write-only"),
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Busy => write!(f, "Command queue busy, command dropped"),
            ChannelError::Closed => write!(f, "Motion controller has shut down"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Error::Channel(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {}
