//! Threaded runtime (std only).
//!
//! Runs a [`MotionController`](crate::motion::MotionController) on its own
//! thread and feeds it through a bounded command queue.

mod actuator;
mod channel;

pub use actuator::{Actuator, ActuatorHandle, ThreadDelay};
pub use channel::{channel, CommandReceiver, CommandSender, COMMAND_QUEUE_CAPACITY};
