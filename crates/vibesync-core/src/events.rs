use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every session state change produces an Event.
/// The CLI prints them; a GUI shell would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        mode: Mode,
        time_left_secs: u32,
        cycle_number: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        mode: Mode,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    SessionReconfigured {
        focus_secs: u32,
        short_break_secs: u32,
        long_break_secs: u32,
        at: DateTime<Utc>,
    },
    /// A focus countdown ran out: one flow record was appended and the
    /// persisted cycle counter incremented before this event is returned.
    CycleCompleted {
        cycle_number: u32,
        score: i64,
        total_completed: u64,
        at: DateTime<Utc>,
    },
    /// The break following a completed focus cycle is staged, paused.
    BreakStaged {
        mode: Mode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A break ran out; the next focus cycle is staged, paused.
    FocusStaged {
        cycle_number: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        time_left_secs: u32,
        is_active: bool,
        cycle_number: u32,
        progress_percent: f64,
        at: DateTime<Utc>,
    },
}
