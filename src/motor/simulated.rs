//! In-memory motor driver for host builds (std only).

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::Result;

use super::driver::MotorDriver;
use super::sequence::CoilPattern;

#[derive(Debug, Default)]
struct Lines {
    fault: AtomicBool,
    pattern: AtomicU8,
    enabled: AtomicBool,
    pattern_writes: AtomicU32,
}

/// Driver that records coil activity instead of toggling GPIO.
///
/// The fault line can be driven from any thread through a [`DriverProbe`].
#[derive(Debug, Clone, Default)]
pub struct SimulatedDriver {
    lines: Arc<Lines>,
}

/// Observer/injector paired with a [`SimulatedDriver`].
#[derive(Debug, Clone)]
pub struct DriverProbe {
    lines: Arc<Lines>,
}

impl SimulatedDriver {
    /// Create a driver with coils off, asleep, and no fault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for observing coils and injecting faults.
    pub fn probe(&self) -> DriverProbe {
        DriverProbe {
            lines: Arc::clone(&self.lines),
        }
    }
}

impl MotorDriver for SimulatedDriver {
    fn energize(&mut self, pattern: CoilPattern) -> Result<()> {
        let previous = self.lines.pattern.swap(pattern.bits(), Ordering::AcqRel);
        if previous != pattern.bits() && pattern.is_energized() {
            self.lines.pattern_writes.fetch_add(1, Ordering::AcqRel);
        }
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.lines.enabled.store(enabled, Ordering::Release);
        Ok(())
    }

    fn fault_asserted(&mut self) -> Result<bool> {
        Ok(self.lines.fault.load(Ordering::Acquire))
    }
}

impl DriverProbe {
    /// Assert or release the simulated fault line.
    pub fn set_fault(&self, asserted: bool) {
        self.lines.fault.store(asserted, Ordering::Release);
    }

    /// Pattern currently on the bridge inputs.
    pub fn pattern(&self) -> CoilPattern {
        CoilPattern::from_bits(self.lines.pattern.load(Ordering::Acquire))
    }

    /// Whether any coil is driven.
    pub fn is_energized(&self) -> bool {
        self.pattern().is_energized()
    }

    /// SLEEP line level.
    pub fn is_enabled(&self) -> bool {
        self.lines.enabled.load(Ordering::Acquire)
    }

    /// Number of distinct energized patterns written so far.
    pub fn pattern_writes(&self) -> u32 {
        self.lines.pattern_writes.load(Ordering::Acquire)
    }
}
