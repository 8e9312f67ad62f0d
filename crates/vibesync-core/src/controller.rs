//! Session controller.
//!
//! Composition root for a running session: owns the timer state machine,
//! the persistence handle and the (at most one) live clock schedule.
//! Translates user actions into timer operations and turns focus->break
//! transitions into persisted flow records and an incremented cycle
//! counter. Both writes land before control returns, so an external
//! reader polling between actions never sees a mismatched pair.

use chrono::Utc;
use tokio::sync::mpsc;

use crate::error::CoreError;
use crate::events::Event;
use crate::flow::{FlowRecord, CYCLE_SCORE};
use crate::storage::Database;
use crate::timer::{
    ClockHandle, IntervalClock, SessionConfig, SessionTimer, Transition, TICK_PERIOD,
};

pub struct SessionController {
    timer: SessionTimer,
    db: Database,
    clock: Option<ClockHandle>,
}

impl SessionController {
    pub fn new(config: SessionConfig, db: Database) -> Self {
        Self {
            timer: SessionTimer::new(config),
            db,
            clock: None,
        }
    }

    /// Resume control of a timer restored from persistence.
    pub fn with_timer(timer: SessionTimer, db: Database) -> Self {
        Self {
            timer,
            db,
            clock: None,
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Activate the countdown without scheduling ticks; the caller
    /// drives `handle_tick` itself (persisted CLI mode).
    pub fn start(&mut self) -> Event {
        self.timer.start();
        Event::SessionStarted {
            mode: self.timer.mode(),
            time_left_secs: self.timer.time_left_secs(),
            cycle_number: self.timer.cycle_number(),
            at: Utc::now(),
        }
    }

    /// Activate the countdown and start the single one-second schedule,
    /// returning the tick stream the caller drains. Any previous
    /// schedule is cancelled first, so at most one is ever live.
    ///
    /// Must be called from within a tokio runtime.
    pub fn begin(&mut self) -> (mpsc::Receiver<()>, Event) {
        self.halt_clock();
        let (handle, ticks) = IntervalClock::start(TICK_PERIOD);
        self.clock = Some(handle);
        (ticks, self.start())
    }

    /// Pause the countdown and cancel any live schedule.
    pub fn pause(&mut self) -> Event {
        self.halt_clock();
        self.timer.pause();
        Event::SessionPaused {
            mode: self.timer.mode(),
            time_left_secs: self.timer.time_left_secs(),
            at: Utc::now(),
        }
    }

    /// Reset to focus cycle 1 and cancel any live schedule.
    pub fn reset(&mut self) -> Event {
        self.halt_clock();
        self.timer.reset();
        Event::SessionReset { at: Utc::now() }
    }

    /// Swap in new durations. Always a full reset; cancels any live
    /// schedule.
    pub fn reconfigure(&mut self, config: SessionConfig) -> Event {
        self.halt_clock();
        self.timer.reconfigure(config);
        Event::SessionReconfigured {
            focus_secs: config.focus_secs,
            short_break_secs: config.short_break_secs,
            long_break_secs: config.long_break_secs,
            at: Utc::now(),
        }
    }

    /// Apply one clock tick.
    ///
    /// Returns no events for an ordinary decrement. On a transition the
    /// schedule is cancelled (the timer comes out paused); a
    /// focus->break transition additionally appends one flow record and
    /// increments the persisted cycle counter before returning.
    ///
    /// # Errors
    /// Returns an error if either persistence write fails.
    pub fn handle_tick(&mut self) -> Result<Vec<Event>, CoreError> {
        let Some(transition) = self.timer.tick() else {
            return Ok(Vec::new());
        };
        // Every transition deactivates the timer; the schedule goes with it.
        self.halt_clock();
        let now = Utc::now();
        match transition {
            Transition::FocusToBreak {
                completed_cycle,
                break_mode,
            } => {
                let record = FlowRecord {
                    timestamp_ms: now.timestamp_millis(),
                    score: CYCLE_SCORE,
                };
                self.db.append_flow(&record)?;
                let total_completed = self.db.increment_completed_cycles()?;
                Ok(vec![
                    Event::CycleCompleted {
                        cycle_number: completed_cycle,
                        score: CYCLE_SCORE,
                        total_completed,
                        at: now,
                    },
                    Event::BreakStaged {
                        mode: break_mode,
                        duration_secs: self.timer.time_left_secs(),
                        at: now,
                    },
                ])
            }
            Transition::BreakToFocus { next_cycle } => Ok(vec![Event::FocusStaged {
                cycle_number: next_cycle,
                duration_secs: self.timer.time_left_secs(),
                at: now,
            }]),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.timer.mode(),
            time_left_secs: self.timer.time_left_secs(),
            is_active: self.timer.is_active(),
            cycle_number: self.timer.cycle_number(),
            progress_percent: self.timer.progress_percent(),
            at: Utc::now(),
        }
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn halt_clock(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Mode;

    fn controller(focus: u32, short: u32, long: u32) -> SessionController {
        let db = Database::open_memory().unwrap();
        let config = SessionConfig::new(focus, short, long).unwrap();
        SessionController::new(config, db)
    }

    fn run_to_transition(c: &mut SessionController) -> Vec<Event> {
        c.start();
        loop {
            let events = c.handle_tick().unwrap();
            if !events.is_empty() {
                return events;
            }
        }
    }

    #[test]
    fn completed_focus_cycle_persists_record_and_counter() {
        let mut c = controller(3, 2, 5);
        let events = run_to_transition(&mut c);

        assert!(matches!(
            events[0],
            Event::CycleCompleted {
                cycle_number: 1,
                score: CYCLE_SCORE,
                total_completed: 1,
                ..
            }
        ));
        assert!(matches!(
            events[1],
            Event::BreakStaged {
                mode: Mode::ShortBreak,
                duration_secs: 2,
                ..
            }
        ));

        let history = c.database().flow_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score, CYCLE_SCORE);
        assert_eq!(c.database().completed_cycles().unwrap(), 1);
    }

    #[test]
    fn break_completion_persists_nothing() {
        let mut c = controller(2, 2, 5);
        run_to_transition(&mut c); // focus -> break
        let events = run_to_transition(&mut c); // break -> focus

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::FocusStaged { cycle_number: 2, .. }
        ));
        assert_eq!(c.database().flow_history().unwrap().len(), 1);
        assert_eq!(c.database().completed_cycles().unwrap(), 1);
    }

    #[test]
    fn counter_accumulates_across_reconfigure() {
        let mut c = controller(2, 1, 5);
        run_to_transition(&mut c);
        run_to_transition(&mut c);
        run_to_transition(&mut c);
        assert_eq!(c.database().completed_cycles().unwrap(), 2);
        assert_eq!(c.timer().cycle_number(), 2);

        // Reconfigure resets the session counter but not the
        // persisted total.
        c.reconfigure(SessionConfig::new(4, 2, 6).unwrap());
        assert_eq!(c.timer().cycle_number(), 1);
        assert_eq!(c.database().completed_cycles().unwrap(), 2);

        run_to_transition(&mut c);
        assert_eq!(c.database().completed_cycles().unwrap(), 3);
    }

    #[test]
    fn tick_without_start_changes_nothing() {
        let mut c = controller(5, 2, 5);
        assert!(c.handle_tick().unwrap().is_empty());
        assert_eq!(c.timer().time_left_secs(), 5);
        assert!(c.database().flow_history().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn begin_delivers_ticks_and_pause_stops_them() {
        let mut c = controller(5, 2, 5);
        let (mut ticks, _event) = c.begin();
        assert!(c.timer().is_active());

        // The paused tokio clock auto-advances, so this arrives
        // immediately in test time.
        assert!(ticks.recv().await.is_some());
        assert!(c.handle_tick().unwrap().is_empty());
        assert_eq!(c.timer().time_left_secs(), 4);

        c.pause();
        assert!(!c.timer().is_active());
        // Cancelled schedule: the stream drains to closure.
        while ticks.recv().await.is_some() {}
    }
}
