//! One-second interval clock driver.
//!
//! The only component that touches wall-clock time while a session is
//! running. A schedule is a spawned tokio task forwarding ticks over a
//! channel; the returned [`ClockHandle`] cancels it. The controller owns
//! at most one handle, so at most one schedule is ever live per session.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The session countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running schedule. Cancelling (or dropping) the handle
/// aborts the task, so no orphaned callback can keep decrementing a
/// discarded countdown.
#[derive(Debug)]
pub struct ClockHandle {
    task: JoinHandle<()>,
}

impl ClockHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Factory for tick schedules.
pub struct IntervalClock;

impl IntervalClock {
    /// Spawn a schedule delivering one tick per `period` on the returned
    /// channel. The first tick arrives after one full period. The
    /// schedule stops when the handle is cancelled or the receiver is
    /// dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> (ClockHandle, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // interval's first tick completes immediately; skip it so the
            // countdown starts a full period after start().
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    // Receiver gone -- the session was torn down.
                    break;
                }
            }
        });
        (ClockHandle { task }, rx)
    }
}
