//! Control loop timing (`[timing]` table).

use serde::Deserialize;

/// Intervals that shape the control loop and command hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long each tick waits for a pending command.
    pub poll_timeout_ms: u32,
    /// Sleep between ticks while not moving.
    pub idle_interval_ms: u32,
    /// Sleep after a fault before the line is polled again.
    pub fault_backoff_ms: u32,
    /// Longest a producer may wait for queue space.
    pub submit_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 10,
            idle_interval_ms: 100,
            fault_backoff_ms: 1000,
            submit_timeout_ms: 100,
        }
    }
}

impl TimingConfig {
    /// Timing with no waits at all, for single-stepping in tests.
    pub const fn immediate() -> Self {
        Self {
            poll_timeout_ms: 0,
            idle_interval_ms: 0,
            fault_backoff_ms: 0,
            submit_timeout_ms: 1,
        }
    }
}
