//! Session timer state machine.
//!
//! The timer has no internal thread -- the caller feeds it one `tick()`
//! per second (see [`IntervalClock`](super::IntervalClock)) and applies
//! user actions directly.
//!
//! ## Mode cycle
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> Focus (cycle 4) -> LongBreak -> Focus
//! ```
//!
//! Every transition leaves the timer paused: a break (or the next focus
//! cycle) is presented and waits for an explicit `start()`.

use serde::{Deserialize, Serialize};

use super::SessionConfig;

/// The three session modes. `mode` is the single source of truth --
/// "is this a break" is answered by [`Mode::is_break`], never by a
/// parallel flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub fn is_break(self) -> bool {
        !matches!(self, Mode::Focus)
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }
}

/// A zero-crossing resolved by `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A focus countdown ran out. The break is staged and paused;
    /// `completed_cycle` is the ordinal of the focus cycle that just
    /// finished (it does not advance until the break ends).
    FocusToBreak {
        completed_cycle: u32,
        break_mode: Mode,
    },
    /// A break countdown ran out. The timer is back at Focus with
    /// `next_cycle` as the new cycle ordinal, staged and paused.
    BreakToFocus { next_cycle: u32 },
}

/// Core session timer.
///
/// Owns mode, remaining time, the active flag and the cycle counter.
/// All mutation happens through `start`/`pause`/`reset`/`reconfigure`
/// and the once-per-second `tick()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    config: SessionConfig,
    mode: Mode,
    /// Remaining seconds in the current mode, always within
    /// `0..=config.duration_secs(mode)`. Never observed at zero between
    /// calls: a tick that reaches zero switches mode immediately.
    time_left_secs: u32,
    is_active: bool,
    /// Ordinal of the current or upcoming focus cycle, starting at 1.
    /// Increments only when leaving a break.
    cycle_number: u32,
}

impl SessionTimer {
    /// Create a timer at the start of focus cycle 1, paused.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            mode: Mode::Focus,
            time_left_secs: config.focus_secs,
            is_active: false,
            cycle_number: 1,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn cycle_number(&self) -> u32 {
        self.cycle_number
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 0.0 .. 100.0, remaining fraction of the current mode's duration.
    ///
    /// Always derived from `time_left_secs` and the current mode, never
    /// stored. The duration is positive by construction.
    pub fn progress_percent(&self) -> f64 {
        100.0 * self.time_left_secs as f64 / self.config.duration_secs(self.mode) as f64
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Begin (or resume) the countdown. No-op when already active or at
    /// zero -- zero is always resolved by an immediate transition, never
    /// left pending.
    pub fn start(&mut self) {
        if self.is_active || self.time_left_secs == 0 {
            return;
        }
        self.is_active = true;
    }

    /// Stop the countdown. Idempotent, safe in any state.
    pub fn pause(&mut self) {
        self.is_active = false;
    }

    /// Back to focus cycle 1 at full focus duration, paused.
    pub fn reset(&mut self) {
        self.is_active = false;
        self.mode = Mode::Focus;
        self.time_left_secs = self.config.focus_secs;
        self.cycle_number = 1;
    }

    /// Swap in new durations. Always a full reset -- an in-progress
    /// countdown is never prorated to the new durations.
    pub fn reconfigure(&mut self, config: SessionConfig) {
        self.config = config;
        self.reset();
    }

    /// Advance the countdown by one second.
    ///
    /// A no-op while paused (a tick that fires after pause or teardown
    /// must not decrement a discarded countdown). When the countdown
    /// reaches zero the mode switch happens inside the same call and the
    /// resulting [`Transition`] is returned; the timer comes out of every
    /// transition paused.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.is_active {
            return None;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            return None;
        }
        Some(self.switch_mode())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn switch_mode(&mut self) -> Transition {
        self.is_active = false;
        match self.mode {
            Mode::Focus => {
                let completed_cycle = self.cycle_number;
                // Every 4th cycle earns the long break. The counter is the
                // same one shown to the user, so "cycle 1" spans the first
                // focus and its break.
                let break_mode = if self.cycle_number % 4 == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                };
                self.mode = break_mode;
                self.time_left_secs = self.config.duration_secs(break_mode);
                Transition::FocusToBreak {
                    completed_cycle,
                    break_mode,
                }
            }
            Mode::ShortBreak | Mode::LongBreak => {
                self.mode = Mode::Focus;
                self.time_left_secs = self.config.focus_secs;
                self.cycle_number += 1;
                Transition::BreakToFocus {
                    next_cycle: self.cycle_number,
                }
            }
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timer(focus: u32, short: u32, long: u32) -> SessionTimer {
        SessionTimer::new(SessionConfig::new(focus, short, long).unwrap())
    }

    /// Run an active countdown to its transition.
    fn run_down(t: &mut SessionTimer) -> Transition {
        t.start();
        loop {
            if let Some(tr) = t.tick() {
                return tr;
            }
        }
    }

    #[test]
    fn new_timer_is_focus_cycle_one_paused() {
        let t = timer(1500, 300, 900);
        assert_eq!(t.mode(), Mode::Focus);
        assert_eq!(t.time_left_secs(), 1500);
        assert_eq!(t.cycle_number(), 1);
        assert!(!t.is_active());
        assert_eq!(t.progress_percent(), 100.0);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut t = timer(10, 3, 5);
        t.start();
        assert!(t.is_active());
        t.start();
        assert!(t.is_active());
        assert_eq!(t.time_left_secs(), 10);

        t.pause();
        assert!(!t.is_active());
        t.pause();
        assert!(!t.is_active());
        assert_eq!(t.time_left_secs(), 10);
    }

    #[test]
    fn tick_while_paused_is_a_no_op() {
        let mut t = timer(10, 3, 5);
        assert!(t.tick().is_none());
        assert_eq!(t.time_left_secs(), 10);
    }

    #[test]
    fn focus_runs_down_to_short_break() {
        let mut t = timer(3, 7, 11);
        let transition = run_down(&mut t);
        assert_eq!(
            transition,
            Transition::FocusToBreak {
                completed_cycle: 1,
                break_mode: Mode::ShortBreak,
            }
        );
        // Cycle number does not advance until the break ends.
        assert_eq!(t.cycle_number(), 1);
        assert_eq!(t.mode(), Mode::ShortBreak);
        assert_eq!(t.time_left_secs(), 7);
        assert!(!t.is_active());
    }

    #[test]
    fn break_runs_down_back_to_focus_and_increments_cycle() {
        let mut t = timer(3, 2, 11);
        run_down(&mut t); // focus -> short break
        let transition = run_down(&mut t); // short break -> focus
        assert_eq!(transition, Transition::BreakToFocus { next_cycle: 2 });
        assert_eq!(t.mode(), Mode::Focus);
        assert_eq!(t.time_left_secs(), 3);
        assert_eq!(t.cycle_number(), 2);
        assert!(!t.is_active());
    }

    #[test]
    fn fourth_cycle_earns_the_long_break() {
        let mut t = timer(2, 1, 9);
        // Cycles 1-3 end in short breaks.
        for expected_cycle in 1..=3u32 {
            let tr = run_down(&mut t);
            assert_eq!(
                tr,
                Transition::FocusToBreak {
                    completed_cycle: expected_cycle,
                    break_mode: Mode::ShortBreak,
                }
            );
            run_down(&mut t); // finish the break
        }
        // Cycle 4 ends in the long break.
        let tr = run_down(&mut t);
        assert_eq!(
            tr,
            Transition::FocusToBreak {
                completed_cycle: 4,
                break_mode: Mode::LongBreak,
            }
        );
        assert_eq!(t.time_left_secs(), 9);
    }

    #[test]
    fn reset_restores_cycle_one_focus() {
        let mut t = timer(5, 2, 9);
        run_down(&mut t);
        run_down(&mut t);
        t.start();
        t.tick();
        t.reset();
        assert_eq!(t.mode(), Mode::Focus);
        assert_eq!(t.time_left_secs(), 5);
        assert_eq!(t.cycle_number(), 1);
        assert!(!t.is_active());
    }

    #[test]
    fn reconfigure_mid_countdown_resets_to_new_durations() {
        let mut t = timer(1500, 300, 900);
        t.start();
        for _ in 0..1490 {
            t.tick();
        }
        assert_eq!(t.time_left_secs(), 10);

        t.reconfigure(SessionConfig::new(600, 120, 300).unwrap());
        assert_eq!(t.mode(), Mode::Focus);
        assert_eq!(t.time_left_secs(), 600);
        assert_eq!(t.cycle_number(), 1);
        assert!(!t.is_active());
    }

    #[test]
    fn progress_tracks_remaining_fraction() {
        let mut t = timer(4, 2, 9);
        assert_eq!(t.progress_percent(), 100.0);
        t.start();
        t.tick();
        assert_eq!(t.progress_percent(), 75.0);
        t.tick();
        assert_eq!(t.progress_percent(), 50.0);
    }

    #[test]
    fn is_break_predicate() {
        assert!(!Mode::Focus.is_break());
        assert!(Mode::ShortBreak.is_break());
        assert!(Mode::LongBreak.is_break());
    }

    #[test]
    fn serde_round_trip_preserves_state() {
        let mut t = timer(30, 5, 10);
        t.start();
        t.tick();
        t.tick();
        let json = serde_json::to_string(&t).unwrap();
        let back: SessionTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode(), t.mode());
        assert_eq!(back.time_left_secs(), t.time_left_secs());
        assert_eq!(back.cycle_number(), t.cycle_number());
        assert_eq!(back.is_active(), t.is_active());
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start,
        Pause,
        Tick,
        Reset,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Tick),
            1 => Just(Op::Start),
            1 => Just(Op::Pause),
            1 => Just(Op::Reset),
        ]
    }

    proptest! {
        /// Invariants hold under arbitrary operation sequences:
        /// time never exceeds the current mode's duration, never rests at
        /// zero, and progress always equals the derived formula.
        #[test]
        fn invariants_hold_under_random_ops(
            focus in 1u32..60,
            short in 1u32..20,
            long in 1u32..40,
            ops in proptest::collection::vec(op_strategy(), 1..200),
        ) {
            let mut t = timer(focus, short, long);
            for op in ops {
                match op {
                    Op::Start => t.start(),
                    Op::Pause => t.pause(),
                    Op::Tick => {
                        t.tick();
                    }
                    Op::Reset => t.reset(),
                }
                let duration = t.config().duration_secs(t.mode());
                prop_assert!(t.time_left_secs() >= 1);
                prop_assert!(t.time_left_secs() <= duration);
                prop_assert!(t.cycle_number() >= 1);
                let expected = 100.0 * t.time_left_secs() as f64 / duration as f64;
                prop_assert_eq!(t.progress_percent(), expected);
            }
        }
    }
}
