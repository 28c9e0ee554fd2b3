//! # FocusLedger Core Library
//!
//! This library provides the scoring engine behind FocusLedger, a personal
//! weekly planning and self-scoring tracker. It records planned versus
//! actual focus minutes per task, turns them into a weighted weekly score,
//! and grades attendance against the week's budget.
//!
//! Screens, persistence and timers' wall clocks live outside this crate.
//! Hosts hand in plan snapshots and one tick per second; the core hands
//! back derived figures and minute deltas.
//!
//! ## Architecture
//!
//! - **Categories**: closed set of task categories with fixed weight
//!   multipliers and an unknown-tag fallback
//! - **Plans**: weekly plans owning their tasks and rewards, kept in a
//!   [`PlanBook`] keyed by unique week number
//! - **Stats**: pure aggregation of a plan into totals, per-category
//!   progress, completion rate and rating
//! - **Sessions**: manual, countdown and stopwatch state machines that
//!   yield the minutes to add to a task
//!
//! ## Key Components
//!
//! - [`WeeklyPlan`]: one week's budget, tasks and rewards
//! - [`WeeklySummary`]: every derived weekly figure in one snapshot
//! - [`RecordingSession`]: the three recording strategies behind one API
//! - [`TaskRecording`]: a session bound to a task, committed once
//! - [`Config`]: application configuration management

pub mod category;
pub mod config;
pub mod error;
pub mod events;
pub mod plan;
pub mod session;
pub mod stats;

pub use category::{color_of, multiplier_of, TaskCategory, ThemeColor};
pub use config::{Config, PlanConfig, SessionConfig};
pub use error::{ConfigError, CoreError, PlanError, Result, ValidationError};
pub use events::Event;
pub use plan::{PlanBook, RewardItem, TaskItem, WeeklyPlan, DEFAULT_ATTENDANCE_BUDGET};
pub use session::{
    CountdownLimits, CountdownSession, ManualEntry, RecordingSession, SessionMode, SessionState,
    StopwatchSession, TaskRecording,
};
pub use stats::{AttendanceRating, CategoryProgress, WeeklySummary};
