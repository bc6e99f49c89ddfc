//! The motion state machine.
//!
//! One call to [`MotionController::step`] is one control-loop tick: apply at
//! most one command, poll the fault line, advance at most one full step, and
//! report how long the caller should sleep before the next tick.

use crate::config::{
    validate_config, MechanicalConstraints, PositionLimiter, SpeedConfig, SystemConfig, TimingConfig,
};
use crate::error::Result;
use crate::motor::{Direction, MotorDriver, MotorState, MotorStatus, StepSequencer};

use super::command::Command;
use super::snapshot::StatusSnapshot;

/// Result of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// How long to wait before the next tick.
    pub sleep_ms: u32,
    /// Whether a step was taken.
    pub stepped: bool,
    /// Status after the tick.
    pub status: MotorStatus,
}

/// Owns the motor state and the driver, and is their only writer.
pub struct MotionController<D: MotorDriver> {
    driver: D,
    state: MotorState,
    limits: PositionLimiter,
    speed: SpeedConfig,
    timing: TimingConfig,
}

impl<D: MotorDriver> MotionController<D> {
    /// Create a controller at position 0 (or the nearest limit) with the
    /// default speed. The driver is woken and its coils released.
    pub fn new(mut driver: D, constraints: MechanicalConstraints, timing: TimingConfig) -> Result<Self> {
        let limits = constraints.limits;
        let speed = constraints.speed;
        let state = MotorState::new(limits.min(), limits.max(), speed.default_delay_ms);

        driver.set_enabled(true)?;
        driver.de_energize()?;

        info!(
            "controller ready: limits [{}, {}], speed {} ms",
            limits.min(),
            limits.max(),
            speed.default_delay_ms
        );

        Ok(Self {
            driver,
            state,
            limits,
            speed,
            timing,
        })
    }

    /// Create a controller from a configuration.
    ///
    /// The configuration is validated first, so limits always fit the
    /// 16-bit characteristics.
    pub fn from_config(driver: D, config: &SystemConfig) -> Result<Self> {
        validate_config(config)?;
        Self::new(driver, MechanicalConstraints::from_config(config), config.timing)
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> MotorStatus {
        self.state.status()
    }

    /// Copy of the current state for publishing.
    #[inline]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::from(&self.state)
    }

    /// Travel limits.
    #[inline]
    pub fn limits(&self) -> PositionLimiter {
        self.limits
    }

    /// Loop timing.
    #[inline]
    pub fn timing(&self) -> TimingConfig {
        self.timing
    }

    /// The motor driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the motor driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Release the driver.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Run one tick.
    ///
    /// Driver errors never escape: they are logged and handled like an
    /// asserted fault line.
    pub fn step(&mut self, command: Option<Command>) -> Tick {
        let mut driver_failed = false;

        if let Some(command) = command {
            if self.apply(command).is_err() {
                error!("driver error while applying {:?}", command);
                driver_failed = true;
            }
        }

        let fault = driver_failed
            || self.driver.fault_asserted().unwrap_or_else(|_| {
                error!("fault line unreadable");
                true
            });

        if fault {
            return self.enter_fault();
        }

        if self.state.fault {
            self.state.fault = false;
            info!("fault cleared at position {}", self.state.current_position);
        }

        if self.state.moving {
            return self.advance();
        }

        if self.driver.de_energize().is_err() {
            return self.enter_fault();
        }

        Tick {
            sleep_ms: self.timing.idle_interval_ms,
            stepped: false,
            status: self.state.status(),
        }
    }

    /// Apply a command to the state.
    ///
    /// Motion commands are ignored while the driver is disabled. Errors come
    /// only from the driver.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        if command.is_motion() && !self.state.enabled {
            debug!("ignoring {:?} while disabled", command);
            return Ok(());
        }

        match command {
            Command::Stop => {
                self.halt();
            }
            Command::MoveAbsolute(position) => {
                self.set_target(self.limits.clamp(position));
            }
            Command::MoveRelative(delta) => {
                self.set_target(self.limits.clamp_relative(self.state.current_position, delta));
            }
            Command::Home => {
                self.set_target(self.limits.clamp(0));
            }
            Command::SetSpeed(delay_ms) => {
                self.state.speed_delay_ms = self.speed.apply(delay_ms);
            }
            Command::Enable => {
                self.state.enabled = true;
                self.driver.set_enabled(true)?;
            }
            Command::Disable => {
                self.state.enabled = false;
                self.halt();
                self.driver.de_energize()?;
                self.driver.set_enabled(false)?;
            }
        }

        debug!(
            "applied {:?}: target {} speed {} ms",
            command,
            self.state.target_position,
            self.state.speed_delay_ms
        );
        Ok(())
    }

    fn set_target(&mut self, target: i32) {
        self.state.target_position = target;
        self.state.moving = target != self.state.current_position;
    }

    fn halt(&mut self) {
        self.state.target_position = self.state.current_position;
        self.state.moving = false;
    }

    fn enter_fault(&mut self) -> Tick {
        if !self.state.fault {
            warn!("driver fault at position {}", self.state.current_position);
        }
        self.state.fault = true;
        self.halt();
        if self.driver.de_energize().is_err() {
            error!("could not release coils after fault");
        }

        Tick {
            sleep_ms: self.timing.fault_backoff_ms,
            stepped: false,
            status: MotorStatus::Error,
        }
    }

    fn advance(&mut self) -> Tick {
        let direction = Direction::toward(self.state.current_position, self.state.target_position);
        self.state.direction = direction;
        self.state.phase = self.state.phase.advance(direction);
        self.state.current_position += direction.sign();

        if self.driver.energize(StepSequencer::pattern(self.state.phase)).is_err() {
            return self.enter_fault();
        }

        if self.state.current_position == self.state.target_position {
            self.state.moving = false;
            if self.driver.de_energize().is_err() {
                return self.enter_fault();
            }
            info!("target {} reached", self.state.target_position);
        } else {
            trace!("step to {}", self.state.current_position);
        }

        Tick {
            sleep_ms: u32::from(self.state.speed_delay_ms),
            stepped: true,
            status: self.state.status(),
        }
    }
}
