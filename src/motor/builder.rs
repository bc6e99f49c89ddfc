//! Builder pattern for CoilDriver.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::MotorConfig;
use crate::error::{ConfigError, Error, Result};

use super::driver::CoilDriver;

/// Builder for creating CoilDriver instances.
pub struct CoilDriverBuilder<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>
where
    AIN1: OutputPin,
    AIN2: OutputPin,
    BIN1: OutputPin,
    BIN2: OutputPin,
    SLEEP: OutputPin,
    FAULT: InputPin,
{
    ain1: Option<AIN1>,
    ain2: Option<AIN2>,
    bin1: Option<BIN1>,
    bin2: Option<BIN2>,
    sleep: Option<SLEEP>,
    fault: Option<FAULT>,
    fault_active_low: bool,
}

impl<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT> Default
    for CoilDriverBuilder<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>
where
    AIN1: OutputPin,
    AIN2: OutputPin,
    BIN1: OutputPin,
    BIN2: OutputPin,
    SLEEP: OutputPin,
    FAULT: InputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT> CoilDriverBuilder<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>
where
    AIN1: OutputPin,
    AIN2: OutputPin,
    BIN1: OutputPin,
    BIN2: OutputPin,
    SLEEP: OutputPin,
    FAULT: InputPin,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            ain1: None,
            ain2: None,
            bin1: None,
            bin2: None,
            sleep: None,
            fault: None,
            fault_active_low: true,
        }
    }

    /// Set the bridge A pins (AIN1, AIN2).
    pub fn coil_a(mut self, ain1: AIN1, ain2: AIN2) -> Self {
        self.ain1 = Some(ain1);
        self.ain2 = Some(ain2);
        self
    }

    /// Set the bridge B pins (BIN1, BIN2).
    pub fn coil_b(mut self, bin1: BIN1, bin2: BIN2) -> Self {
        self.bin1 = Some(bin1);
        self.bin2 = Some(bin2);
        self
    }

    /// Set the SLEEP (enable) pin.
    pub fn sleep_pin(mut self, pin: SLEEP) -> Self {
        self.sleep = Some(pin);
        self
    }

    /// Set the FAULT input pin.
    pub fn fault_pin(mut self, pin: FAULT) -> Self {
        self.fault = Some(pin);
        self
    }

    /// Set fault line polarity.
    pub fn fault_active_low(mut self, active_low: bool) -> Self {
        self.fault_active_low = active_low;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.fault_active_low = config.fault_active_low;
        self
    }

    /// Build the CoilDriver.
    ///
    /// # Errors
    ///
    /// Returns an error if any pin is missing.
    pub fn build(self) -> Result<CoilDriver<AIN1, AIN2, BIN1, BIN2, SLEEP, FAULT>> {
        let ain1 = self.ain1.ok_or(Error::Config(ConfigError::MissingField("ain1 pin")))?;
        let ain2 = self.ain2.ok_or(Error::Config(ConfigError::MissingField("ain2 pin")))?;
        let bin1 = self.bin1.ok_or(Error::Config(ConfigError::MissingField("bin1 pin")))?;
        let bin2 = self.bin2.ok_or(Error::Config(ConfigError::MissingField("bin2 pin")))?;
        let sleep = self.sleep.ok_or(Error::Config(ConfigError::MissingField("sleep pin")))?;
        let fault = self.fault.ok_or(Error::Config(ConfigError::MissingField("fault pin")))?;

        Ok(CoilDriver::new(
            ain1,
            ain2,
            bin1,
            bin2,
            sleep,
            fault,
            self.fault_active_low,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::MotorDriver;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as T};

    struct DummyPin;

    impl embedded_hal::digital::ErrorType for DummyPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for DummyPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            Ok(())
        }
    }

    impl InputPin for DummyPin {
        fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(true)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(false)
        }
    }

    #[test]
    fn test_missing_pin() {
        let result = CoilDriverBuilder::<DummyPin, DummyPin, DummyPin, DummyPin, DummyPin, DummyPin>::new()
            .coil_a(DummyPin, DummyPin)
            .coil_b(DummyPin, DummyPin)
            .sleep_pin(DummyPin)
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("fault pin")))
        ));
    }

    #[test]
    fn test_default_polarity_is_active_low() {
        let mut driver = CoilDriverBuilder::new()
            .coil_a(DummyPin, DummyPin)
            .coil_b(DummyPin, DummyPin)
            .sleep_pin(DummyPin)
            .fault_pin(DummyPin)
            .build()
            .unwrap();

        // Line idles high through the pull-up: no fault.
        assert!(!driver.fault_asserted().unwrap());
    }

    #[test]
    fn test_polarity_from_config() {
        let config = MotorConfig {
            fault_active_low: false,
            ..MotorConfig::default()
        };

        let mut driver = CoilDriverBuilder::new()
            .coil_a(PinMock::new(&[]), PinMock::new(&[]))
            .coil_b(PinMock::new(&[]), PinMock::new(&[]))
            .sleep_pin(PinMock::new(&[]))
            .fault_pin(PinMock::new(&[T::get(State::High)]))
            .from_motor_config(&config)
            .build()
            .unwrap();

        assert!(driver.fault_asserted().unwrap());

        let (mut a1, mut a2, mut b1, mut b2, mut sleep, mut fault) = driver.release();
        a1.done();
        a2.done();
        b1.done();
        b2.done();
        sleep.done();
        fault.done();
    }
}
