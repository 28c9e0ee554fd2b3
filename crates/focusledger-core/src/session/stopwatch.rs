//! Open-ended stopwatch session.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{clock_hh_mm_ss, SessionMode, SessionState};
use crate::events::Event;

/// Counts up from zero while running. On stop it credits whole minutes,
/// but never rounds a non-zero run down to nothing: anything under a
/// minute credits one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopwatchSession {
    elapsed_secs: u64,
    state: SessionState,
    #[serde(default)]
    credited_minutes: Option<u32>,
}

impl StopwatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn minutes_to_add(&self) -> Option<u32> {
        self.credited_minutes
    }

    /// `HH:MM:SS` once an hour has passed, `MM:SS` before.
    pub fn clock(&self) -> String {
        clock_hh_mm_ss(self.elapsed_secs)
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Running;
                tracing::debug!("stopwatch started");
                Some(Event::SessionStarted {
                    mode: SessionMode::Stopwatch,
                    at: Utc::now(),
                })
            }
            SessionState::Paused => self.resume(),
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.state = SessionState::Paused;
        Some(Event::SessionPaused {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        self.state = SessionState::Running;
        Some(Event::SessionResumed {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Idle | SessionState::Paused => self.start(),
            _ => None,
        }
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.advance(1)
    }

    /// Count `secs` seconds at once. Never completes on its own.
    pub fn advance(&mut self, secs: u64) -> Option<Event> {
        if self.state == SessionState::Running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
        }
        None
    }

    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Running | SessionState::Paused => {
                let minutes = credited_minutes(self.elapsed_secs);
                self.state = SessionState::Completed;
                self.credited_minutes = Some(minutes);
                tracing::debug!(minutes, elapsed_secs = self.elapsed_secs, "stopwatch stopped");
                Some(Event::SessionCompleted {
                    mode: SessionMode::Stopwatch,
                    minutes,
                    elapsed_secs: self.elapsed_secs,
                    auto_completed: false,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Running | SessionState::Paused => {
                self.state = SessionState::Cancelled;
                tracing::debug!(discarded_secs = self.elapsed_secs, "stopwatch cancelled");
                Some(Event::SessionCancelled {
                    mode: SessionMode::Stopwatch,
                    discarded_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

/// Whole minutes, with any non-zero sub-minute run forced up to 1.
fn credited_minutes(elapsed_secs: u64) -> u32 {
    let minutes = u32::try_from(elapsed_secs / 60).unwrap_or(u32::MAX);
    if elapsed_secs > 0 && minutes == 0 {
        1
    } else {
        minutes
    }
}
