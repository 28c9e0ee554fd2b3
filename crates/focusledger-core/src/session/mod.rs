//! Recording sessions.
//!
//! A session is a bounded interaction that produces a minutes delta for
//! exactly one task. Three interchangeable strategies share one contract:
//! feed them ticks and commands, and once completed they report
//! `minutes_to_add`. Only a completed session credits time; a cancelled one
//! drops whatever it counted.
//!
//! [`TaskRecording`] binds a session to its task and is consumed by
//! [`TaskRecording::commit`], so a session's minutes reach the plan at most
//! once.

mod countdown;
mod manual;
mod stopwatch;

pub use countdown::{CountdownLimits, CountdownSession};
pub use manual::ManualEntry;
pub use stopwatch::StopwatchSession;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::PlanError;
use crate::events::Event;
use crate::plan::WeeklyPlan;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Type the minutes in directly.
    Manual,
    /// Count down from a target.
    #[default]
    Countdown,
    /// Count up until stopped.
    Stopwatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    /// Finished; `minutes_to_add` is set.
    Completed,
    /// Dismissed without stopping; nothing is credited.
    Cancelled,
}

impl SessionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Cancelled)
    }
}

/// One of the three recording strategies, chosen when the session opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RecordingSession {
    Manual(ManualEntry),
    Countdown(CountdownSession),
    Stopwatch(StopwatchSession),
}

impl RecordingSession {
    /// Open an idle session of the given mode using the configured defaults.
    pub fn open(mode: SessionMode, config: &SessionConfig) -> Self {
        match mode {
            SessionMode::Manual => {
                RecordingSession::Manual(ManualEntry::new(config.manual_default_minutes))
            }
            SessionMode::Countdown => RecordingSession::Countdown(CountdownSession::new(
                config.countdown_default_minutes,
                config.countdown_limits(),
            )),
            SessionMode::Stopwatch => RecordingSession::Stopwatch(StopwatchSession::new()),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> SessionMode {
        match self {
            RecordingSession::Manual(_) => SessionMode::Manual,
            RecordingSession::Countdown(_) => SessionMode::Countdown,
            RecordingSession::Stopwatch(_) => SessionMode::Stopwatch,
        }
    }

    pub fn state(&self) -> SessionState {
        match self {
            RecordingSession::Manual(s) => s.state(),
            RecordingSession::Countdown(s) => s.state(),
            RecordingSession::Stopwatch(s) => s.state(),
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        match self {
            RecordingSession::Manual(s) => s.minutes_to_add().map_or(0, |m| u64::from(m) * 60),
            RecordingSession::Countdown(s) => s.elapsed_secs(),
            RecordingSession::Stopwatch(s) => s.elapsed_secs(),
        }
    }

    /// Minutes to merge into the task; `None` until the session completes.
    pub fn minutes_to_add(&self) -> Option<u32> {
        match self {
            RecordingSession::Manual(s) => s.minutes_to_add(),
            RecordingSession::Countdown(s) => s.minutes_to_add(),
            RecordingSession::Stopwatch(s) => s.minutes_to_add(),
        }
    }

    pub fn snapshot(&self) -> Event {
        let (remaining_secs, clock) = match self {
            RecordingSession::Manual(s) => (None, s.input().to_string()),
            RecordingSession::Countdown(s) => (Some(s.remaining_secs()), s.clock()),
            RecordingSession::Stopwatch(s) => (None, s.clock()),
        };
        Event::StateSnapshot {
            mode: self.mode(),
            state: self.state(),
            elapsed_secs: self.elapsed_secs(),
            remaining_secs,
            clock,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One wall-clock second. Manual entries ignore it.
    pub fn tick(&mut self) -> Option<Event> {
        self.advance(1)
    }

    pub fn advance(&mut self, secs: u64) -> Option<Event> {
        match self {
            RecordingSession::Manual(_) => None,
            RecordingSession::Countdown(s) => s.advance(secs),
            RecordingSession::Stopwatch(s) => s.advance(secs),
        }
    }

    /// Play/pause. Manual entries have nothing to toggle.
    pub fn toggle(&mut self) -> Option<Event> {
        match self {
            RecordingSession::Manual(_) => None,
            RecordingSession::Countdown(s) => s.toggle(),
            RecordingSession::Stopwatch(s) => s.toggle(),
        }
    }

    /// Finish the session. For a manual entry this submits the current input.
    pub fn stop(&mut self) -> Option<Event> {
        match self {
            RecordingSession::Manual(s) => s.submit(),
            RecordingSession::Countdown(s) => s.stop(),
            RecordingSession::Stopwatch(s) => s.stop(),
        }
    }

    pub fn cancel(&mut self) -> Option<Event> {
        match self {
            RecordingSession::Manual(s) => s.cancel(),
            RecordingSession::Countdown(s) => s.cancel(),
            RecordingSession::Stopwatch(s) => s.cancel(),
        }
    }
}

/// A recording session aimed at one task of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecording {
    task_id: Uuid,
    session: RecordingSession,
}

impl TaskRecording {
    /// Open a session for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::TaskNotFound`] if the task is not in `plan`.
    pub fn begin(
        plan: &WeeklyPlan,
        task_id: Uuid,
        mode: SessionMode,
        config: &SessionConfig,
    ) -> Result<Self, PlanError> {
        if plan.task(task_id).is_none() {
            return Err(PlanError::TaskNotFound { task_id });
        }
        Ok(Self {
            task_id,
            session: RecordingSession::open(mode, config),
        })
    }

    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut RecordingSession {
        &mut self.session
    }

    /// Merge the completed session into its task and close the recording.
    ///
    /// Returns the minutes added. Sessions that were cancelled, never
    /// completed, or completed with zero minutes add nothing.
    pub fn commit(self, plan: &mut WeeklyPlan) -> Result<u32, PlanError> {
        match self.session.minutes_to_add() {
            Some(minutes) if minutes > 0 => {
                plan.record_minutes(self.task_id, minutes)?;
                Ok(minutes)
            }
            _ => {
                tracing::debug!(
                    task_id = %self.task_id,
                    state = ?self.session.state(),
                    "recording closed without credit"
                );
                Ok(0)
            }
        }
    }
}

/// `MM:SS`, minutes not wrapped at the hour.
pub(crate) fn clock_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `HH:MM:SS` from one hour on, `MM:SS` below.
pub(crate) fn clock_hh_mm_ss(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
