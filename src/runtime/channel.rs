//! Bounded command queue between producers and the control loop.
//!
//! Multi-producer, single-consumer, FIFO. Producers wait a bounded time for
//! space and get [`ChannelError::Busy`] instead of blocking indefinitely.

use std::sync::Arc;
use std::time::{Duration, Instant};

use heapless::Deque;
use parking_lot::{Condvar, Mutex};

use crate::error::ChannelError;
use crate::motion::Command;

/// Commands that may be pending at once.
pub const COMMAND_QUEUE_CAPACITY: usize = 10;

struct Queue {
    commands: Deque<Command, COMMAND_QUEUE_CAPACITY>,
    closed: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    not_empty: Condvar,
    not_full: Condvar,
}

/// Create a connected sender/receiver pair.
pub fn channel(submit_timeout: Duration) -> (CommandSender, CommandReceiver) {
    let shared = Arc::new(Shared {
        queue: Mutex::new(Queue {
            commands: Deque::new(),
            closed: false,
        }),
        not_empty: Condvar::new(),
        not_full: Condvar::new(),
    });

    (
        CommandSender {
            shared: Arc::clone(&shared),
            submit_timeout,
        },
        CommandReceiver { shared },
    )
}

/// Producer side. Clone freely.
#[derive(Clone)]
pub struct CommandSender {
    shared: Arc<Shared>,
    submit_timeout: Duration,
}

impl CommandSender {
    /// Enqueue `command`, waiting at most the submission timeout for space.
    ///
    /// A rejected command is not enqueued.
    pub fn submit(&self, command: Command) -> Result<(), ChannelError> {
        let deadline = Instant::now() + self.submit_timeout;
        let mut queue = self.shared.queue.lock();

        loop {
            if queue.closed {
                return Err(ChannelError::Closed);
            }

            if queue.commands.push_back(command).is_ok() {
                drop(queue);
                self.shared.not_empty.notify_one();
                trace!("queued {:?}", command);
                return Ok(());
            }

            if Instant::now() >= deadline {
                warn!("command queue busy, dropping {:?}", command);
                return Err(ChannelError::Busy);
            }

            self.shared.not_full.wait_until(&mut queue, deadline);
        }
    }

    /// Whether the receiver has gone away.
    pub fn is_closed(&self) -> bool {
        self.shared.queue.lock().closed
    }

    /// Commands currently waiting.
    pub fn pending(&self) -> usize {
        self.shared.queue.lock().commands.len()
    }
}

/// Consumer side, owned by the control loop.
pub struct CommandReceiver {
    shared: Arc<Shared>,
}

impl CommandReceiver {
    /// Take the oldest command, waiting up to `timeout` for one to arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Command> {
        let deadline = Instant::now() + timeout;
        let mut queue = self.shared.queue.lock();

        loop {
            if let Some(command) = queue.commands.pop_front() {
                drop(queue);
                self.shared.not_full.notify_one();
                return Some(command);
            }

            if Instant::now() >= deadline {
                return None;
            }

            self.shared.not_empty.wait_until(&mut queue, deadline);
        }
    }

    /// Take the oldest command without waiting.
    pub fn try_recv(&self) -> Option<Command> {
        self.recv_timeout(Duration::ZERO)
    }

    /// Refuse further submissions. Pending commands stay receivable.
    pub fn close(&self) {
        self.shared.queue.lock().closed = true;
        self.shared.not_full.notify_all();
    }
}

impl Drop for CommandReceiver {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let (tx, rx) = channel(Duration::from_millis(10));
        tx.submit(Command::MoveAbsolute(1)).unwrap();
        tx.submit(Command::Stop).unwrap();
        tx.submit(Command::Home).unwrap();

        assert_eq!(rx.try_recv(), Some(Command::MoveAbsolute(1)));
        assert_eq!(rx.try_recv(), Some(Command::Stop));
        assert_eq!(rx.try_recv(), Some(Command::Home));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn test_full_queue_is_busy() {
        let (tx, rx) = channel(Duration::from_millis(5));
        for i in 0..COMMAND_QUEUE_CAPACITY as i32 {
            tx.submit(Command::MoveAbsolute(i)).unwrap();
        }

        assert_eq!(tx.submit(Command::Stop), Err(ChannelError::Busy));
        assert_eq!(tx.pending(), COMMAND_QUEUE_CAPACITY);

        // Rejected command was not enqueued.
        for i in 0..COMMAND_QUEUE_CAPACITY as i32 {
            assert_eq!(rx.try_recv(), Some(Command::MoveAbsolute(i)));
        }
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn test_waiting_submit_succeeds_when_space_frees() {
        let (tx, rx) = channel(Duration::from_secs(5));
        for _ in 0..COMMAND_QUEUE_CAPACITY {
            tx.submit(Command::Stop).unwrap();
        }

        let producer = {
            let tx = tx.clone();
            std::thread::spawn(move || tx.submit(Command::Home))
        };

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(rx.try_recv(), Some(Command::Stop));
        assert_eq!(producer.join().unwrap(), Ok(()));
        assert_eq!(tx.pending(), COMMAND_QUEUE_CAPACITY);
    }

    #[test]
    fn test_recv_timeout_empty() {
        let (_tx, rx) = channel(Duration::from_millis(5));
        assert_eq!(rx.recv_timeout(Duration::from_millis(2)), None);
    }

    #[test]
    fn test_closed_after_receiver_drop() {
        let (tx, rx) = channel(Duration::from_millis(5));
        assert!(!tx.is_closed());
        drop(rx);
        assert!(tx.is_closed());
        assert_eq!(tx.submit(Command::Stop), Err(ChannelError::Closed));
        assert!(!ChannelError::Closed.is_retryable());
        assert!(ChannelError::Busy.is_retryable());
    }
}
