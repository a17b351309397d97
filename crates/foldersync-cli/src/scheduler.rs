//! Cancellable periodic scheduler
//!
//! Runs exactly one reconciliation cycle at a time. Between cycles the
//! loop waits on a channel with a timeout instead of sleeping, so an
//! interrupt wakes it immediately rather than at the end of the
//! interval. No mid-cycle cancellation: reconciliation is idempotent
//! and safe to restart from scratch.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};

/// Why a wait between cycles ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The interval elapsed; run another cycle
    Elapsed,
    /// An interrupt arrived; shut down cleanly
    Interrupted,
}

/// Periodic timer that an interrupt signal can cut short
pub struct Scheduler {
    interval: Duration,
    interrupt: Receiver<()>,
}

impl Scheduler {
    /// Create a scheduler and install the Ctrl+C handler
    ///
    /// # Errors
    ///
    /// Returns an error if the signal handler cannot be installed.
    pub fn new(interval: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })
        .context("Failed to set Ctrl+C handler")?;

        Ok(Self::with_receiver(interval, rx))
    }

    fn with_receiver(interval: Duration, interrupt: Receiver<()>) -> Self {
        Self {
            interval,
            interrupt,
        }
    }

    /// Block until the interval elapses or an interrupt arrives
    pub fn wait(&self) -> Tick {
        match self.interrupt.recv_timeout(self.interval) {
            Err(RecvTimeoutError::Timeout) => Tick::Elapsed,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => Tick::Interrupted,
        }
    }

    /// Non-blocking check for an interrupt delivered mid-cycle
    pub fn interrupted(&self) -> bool {
        self.interrupt.try_recv().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_wait_elapses_without_interrupt() {
        let (_tx, rx) = mpsc::channel();
        let scheduler = Scheduler::with_receiver(Duration::from_millis(20), rx);

        assert_eq!(scheduler.wait(), Tick::Elapsed);
    }

    #[test]
    fn test_interrupt_cuts_wait_short() {
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::with_receiver(Duration::from_secs(60), rx);

        tx.send(()).unwrap();
        let start = Instant::now();
        assert_eq!(scheduler.wait(), Tick::Interrupted);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_mid_cycle_interrupt_seen_by_poll() {
        let (tx, rx) = mpsc::channel();
        let scheduler = Scheduler::with_receiver(Duration::from_secs(60), rx);

        assert!(!scheduler.interrupted());
        tx.send(()).unwrap();
        assert!(scheduler.interrupted());
    }

    #[test]
    fn test_dropped_sender_ends_wait() {
        let (tx, rx) = mpsc::channel::<()>();
        let scheduler = Scheduler::with_receiver(Duration::from_secs(60), rx);

        drop(tx);
        assert_eq!(scheduler.wait(), Tick::Interrupted);
    }
}
