use serde::{Deserialize, Serialize};

use super::Mode;
use crate::error::ValidationError;

/// Configured durations for one session, in seconds.
///
/// Immutable for the lifetime of a running session -- the state machine
/// never sees a config change except through a full
/// [`reconfigure`](super::SessionTimer::reconfigure). Construction
/// validates positivity, so a zero duration can never reach the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub focus_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
}

impl SessionConfig {
    /// Validate and build a config from second durations.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveDuration`] if any duration
    /// is zero.
    pub fn new(
        focus_secs: u32,
        short_break_secs: u32,
        long_break_secs: u32,
    ) -> Result<Self, ValidationError> {
        if focus_secs == 0 {
            return Err(ValidationError::NonPositiveDuration { field: "focus" });
        }
        if short_break_secs == 0 {
            return Err(ValidationError::NonPositiveDuration {
                field: "short_break",
            });
        }
        if long_break_secs == 0 {
            return Err(ValidationError::NonPositiveDuration {
                field: "long_break",
            });
        }
        Ok(Self {
            focus_secs,
            short_break_secs,
            long_break_secs,
        })
    }

    /// Validate and build a config from minute durations.
    ///
    /// # Errors
    /// Returns [`ValidationError::NonPositiveDuration`] if any duration
    /// is zero.
    pub fn from_minutes(
        focus_min: u32,
        short_break_min: u32,
        long_break_min: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(
            focus_min.saturating_mul(60),
            short_break_min.saturating_mul(60),
            long_break_min.saturating_mul(60),
        )
    }

    /// Duration of the given mode in seconds.
    pub fn duration_secs(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_secs,
            Mode::ShortBreak => self.short_break_secs,
            Mode::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for SessionConfig {
    /// The classic 25/5/15 minute cadence.
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
        }
    }
}
