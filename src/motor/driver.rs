//! H-bridge coil driver.
//!
//! Generic over embedded-hal 1.0 pin types so the same code drives real
//! GPIO and test mocks.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::error::{Error, MotorError, Result};

use super::sequence::CoilPattern;

/// Hardware seam used by the motion controller.
pub trait MotorDriver {
    /// Drive the four bridge inputs to `pattern`.
    fn energize(&mut self, pattern: CoilPattern) -> Result<()>;

    /// Release both coils.
    fn de_energize(&mut self) -> Result<()> {
        self.energize(CoilPattern::OFF)
    }

    /// Wake (`true`) or sleep (`false`) the driver IC.
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Whether the driver currently reports a fault.
    fn fault_asserted(&mut self) -> Result<bool>;
}

impl<T: MotorDriver + ?Sized> MotorDriver for &mut T {
    fn energize(&mut self, pattern: CoilPattern) -> Result<()> {
        (**self).energize(pattern)
    }

    fn de_energize(&mut self) -> Result<()> {
        (**self).de_energize()
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        (**self).set_enabled(enabled)
    }

    fn fault_asserted(&mut self) -> Result<bool> {
        (**self).fault_asserted()
    }
}

/// DRV8833-style dual H-bridge on six GPIO lines.
///
/// Generic over:
/// - `AIN1`, `AIN2`, `BIN1`, `BIN2`: bridge inputs (must implement `OutputPin`)
/// - `SLEEP`: driver enable, high = awake (must implement `OutputPin`)
/// - `FAULT`: driver fault output (must implement `InputPin`)
pub struct CoilDriver<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>
where
    AIN1: OutputPin,
    AIN2: OutputPin,
    BIN1: OutputPin,
    BIN2: OutputPin,
    SLEEP: OutputPin,
    FAULT: InputPin,
{
    ain1: AIN1,
    ain2: AIN2,
    bin1: BIN1,
    bin2: BIN2,
    sleep: SLEEP,
    fault: FAULT,

    /// Whether the FAULT line is asserted low.
    fault_active_low: bool,

    /// Last pattern written (cached to avoid unnecessary pin writes).
    current_pattern: Option<CoilPattern>,

    /// Last SLEEP level written.
    enabled: Option<bool>,
}

impl<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT> CoilDriver<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>
where
    AIN1: OutputPin,
    AIN2: OutputPin,
    BIN1: OutputPin,
    BIN2: OutputPin,
    SLEEP: OutputPin,
    FAULT: InputPin,
{
    /// Create a driver. No pins are touched until the first call.
    pub(crate) fn new(
        ain1: AIN1,
        ain2: AIN2,
        bin1: BIN1,
        bin2: BIN2,
        sleep: SLEEP,
        fault: FAULT,
        fault_active_low: bool,
    ) -> Self {
        Self {
            ain1,
            ain2,
            bin1,
            bin2,
            sleep,
            fault,
            fault_active_low,
            current_pattern: None,
            enabled: None,
        }
    }

    /// Last pattern driven onto the bridge, if any.
    #[inline]
    pub fn pattern(&self) -> Option<CoilPattern> {
        self.current_pattern
    }

    /// Release the pins.
    pub fn release(self) -> (AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT) {
        (self.ain1, self.ain2, self.bin1, self.bin2, self.sleep, self.fault)
    }

    fn write_pattern(&mut self, pattern: CoilPattern) -> Result<()> {
        let [a1, a2, b1, b2] = pattern.levels();
        self.ain1.set_state(PinState::from(a1)).map_err(|_| MotorError::PinError)?;
        self.ain2.set_state(PinState::from(a2)).map_err(|_| MotorError::PinError)?;
        self.bin1.set_state(PinState::from(b1)).map_err(|_| MotorError::PinError)?;
        self.bin2.set_state(PinState::from(b2)).map_err(|_| MotorError::PinError)?;
        Ok(())
    }
}

impl<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT> MotorDriver
    for CoilDriver<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>
where
    AIN1: OutputPin,
    AIN2: OutputPin,
    BIN1: OutputPin,
    BIN2: OutputPin,
    SLEEP: OutputPin,
    FAULT: InputPin,
{
    fn energize(&mut self, pattern: CoilPattern) -> Result<()> {
        if self.current_pattern == Some(pattern) {
            return Ok(());
        }

        // Forget the cache first so a failed write is retried in full.
        self.current_pattern = None;
        self.write_pattern(pattern)?;
        self.current_pattern = Some(pattern);
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.enabled == Some(enabled) {
            return Ok(());
        }

        self.enabled = None;
        self.sleep
            .set_state(PinState::from(enabled))
            .map_err(|_| MotorError::PinError)?;
        self.enabled = Some(enabled);
        Ok(())
    }

    fn fault_asserted(&mut self) -> Result<bool> {
        let asserted = if self.fault_active_low {
            self.fault.is_low()
        } else {
            self.fault.is_high()
        };
        asserted.map_err(|_| Error::Motor(MotorError::PinError))
    }
}
