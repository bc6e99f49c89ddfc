//! Control loop thread and the handle shared with its clients.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::config::PositionLimiter;
use crate::error::{ChannelError, Error, MotorError, Result};
use crate::motion::{Command, MotionController, SnapshotCell, StatusSnapshot};
use crate::motor::MotorDriver;

use super::channel::{channel, CommandReceiver, CommandSender};

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Cloneable client view of a running actuator.
#[derive(Clone)]
pub struct ActuatorHandle {
    sender: CommandSender,
    snapshots: SnapshotCell,
    limits: PositionLimiter,
}

impl ActuatorHandle {
    /// Queue a command for the control loop.
    pub fn submit(&self, command: Command) -> core::result::Result<(), ChannelError> {
        self.sender.submit(command)
    }

    /// Snapshot published after the last completed tick.
    pub fn status(&self) -> StatusSnapshot {
        self.snapshots.load()
    }

    /// Travel limits of the controller.
    pub fn limits(&self) -> PositionLimiter {
        self.limits
    }
}

/// A motion controller running on its own thread.
///
/// Dropping the actuator stops the loop and waits for it.
pub struct Actuator {
    handle: ActuatorHandle,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Actuator {
    /// Move `controller` onto a new thread and start ticking.
    ///
    /// `delay` provides the sleep between ticks.
    pub fn spawn<D, T>(controller: MotionController<D>, delay: T) -> Result<Self>
    where
        D: MotorDriver + Send + 'static,
        T: DelayNs + Send + 'static,
    {
        let timing = controller.timing();
        let (sender, receiver) = channel(Duration::from_millis(u64::from(timing.submit_timeout_ms)));
        let snapshots = SnapshotCell::new(controller.snapshot());
        let stop = Arc::new(AtomicBool::new(false));

        let handle = ActuatorHandle {
            sender,
            snapshots: snapshots.clone(),
            limits: controller.limits(),
        };

        let loop_stop = Arc::clone(&stop);
        let poll = Duration::from_millis(u64::from(timing.poll_timeout_ms));
        let thread = thread::Builder::new()
            .name("motion-control".into())
            .spawn(move || run_loop(controller, receiver, snapshots, delay, poll, loop_stop))
            .map_err(|_| Error::Motor(MotorError::SpawnFailed))?;

        Ok(Self {
            handle,
            stop,
            thread: Some(thread),
        })
    }

    /// A handle for submitting commands and reading status.
    pub fn handle(&self) -> ActuatorHandle {
        self.handle.clone()
    }

    /// Stop the loop and wait for it to exit.
    ///
    /// Takes effect after the tick in progress, including its sleep.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> Result<()> {
        self.stop.store(true, Ordering::Release);
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| Error::Motor(MotorError::LoopPanicked)),
            None => Ok(()),
        }
    }
}

impl Drop for Actuator {
    fn drop(&mut self) {
        if self.stop_and_join().is_err() {
            error!("control loop panicked");
        }
    }
}

fn run_loop<D, T>(
    mut controller: MotionController<D>,
    receiver: CommandReceiver,
    snapshots: SnapshotCell,
    mut delay: T,
    poll: Duration,
    stop: Arc<AtomicBool>,
) where
    D: MotorDriver,
    T: DelayNs,
{
    info!("control loop started");

    while !stop.load(Ordering::Acquire) {
        let command = receiver.recv_timeout(poll);
        let tick = controller.step(command);
        snapshots.publish(controller.snapshot());

        if tick.sleep_ms > 0 {
            delay.delay_ms(tick.sleep_ms);
        }
    }

    receiver.close();
    if controller.driver_mut().de_energize().is_err() {
        error!("could not release coils on shutdown");
    }
    snapshots.publish(controller.snapshot());

    info!("control loop stopped at position {}", controller.state().current_position);
}
