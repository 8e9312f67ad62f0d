mod clock;
mod config;
mod session;

pub use clock::{ClockHandle, IntervalClock, TICK_PERIOD};
pub use config::SessionConfig;
pub use session::{Mode, SessionTimer, Transition};
