//! # VibeSync Core Library
//!
//! This library provides the core business logic for the VibeSync focus
//! companion. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI being a thin layer
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Session Timer**: A tick-driven state machine cycling through focus,
//!   short-break and long-break modes, advanced by a cancellable
//!   one-second interval clock
//! - **Flow Scoring**: An append-only log of scored events with pure
//!   calendar-relative bucketing for charts
//! - **Storage**: SQLite-based history/state storage and TOML-based
//!   configuration
//! - **Advisory**: Best-effort LLM client for theme/music suggestions and
//!   end-of-day reflections, falling back to fixed defaults on any failure
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Core timer state machine
//! - [`SessionController`]: Binds the timer to persistence and the clock
//! - [`flow::flow_chart`]: Time-bucketed flow score aggregation
//! - [`Database`]: Flow history and key-value persistence
//! - [`Config`]: Application configuration management
//! - [`AdvisoryClient`]: External suggestion provider

pub mod advisory;
pub mod ambience;
pub mod controller;
pub mod error;
pub mod events;
pub mod flow;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use advisory::{AdvisoryClient, Mood, MoodSuggestion, Reflection, Theme};
pub use ambience::{builtin_tracks, AmbienceTrack, Playlist};
pub use controller::SessionController;
pub use error::{AdvisoryError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use flow::{flow_chart, Bar, ChartView, FlowChart, FlowRecord};
pub use storage::{Config, Database};
pub use tasks::{Task, TaskList, TaskTag};
pub use timer::{ClockHandle, IntervalClock, Mode, SessionConfig, SessionTimer, Transition};
