use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{SessionMode, SessionState};

/// Every session state change produces an Event.
/// The presentation layer renders them; the caller merges completed minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        mode: SessionMode,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown target changed before the session started.
    TargetAdjusted {
        target_minutes: u32,
        at: DateTime<Utc>,
    },
    /// The session finished and credits `minutes` to its task.
    SessionCompleted {
        mode: SessionMode,
        minutes: u32,
        elapsed_secs: u64,
        /// True when a countdown ran out on its own.
        auto_completed: bool,
        at: DateTime<Utc>,
    },
    /// The session was dismissed; its elapsed time is dropped.
    SessionCancelled {
        mode: SessionMode,
        discarded_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: SessionMode,
        state: SessionState,
        elapsed_secs: u64,
        /// Only set for countdowns.
        remaining_secs: Option<u64>,
        clock: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Minutes to merge into the task, if this event completes a session.
    pub fn minutes_to_add(&self) -> Option<u32> {
        match self {
            Event::SessionCompleted { minutes, .. } => Some(*minutes),
            _ => None,
        }
    }
}
