//! Manual minute entry.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{SessionMode, SessionState};
use crate::events::Event;

/// Back-fills minutes typed in by hand. No timer is involved: a valid
/// submission completes immediately, anything else leaves the entry Idle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualEntry {
    input: String,
    state: SessionState,
    #[serde(default)]
    credited_minutes: Option<u32>,
}

impl ManualEntry {
    /// New entry with the input pre-filled.
    pub fn new(default_minutes: u32) -> Self {
        Self {
            input: default_minutes.to_string(),
            state: SessionState::Idle,
            credited_minutes: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn minutes_to_add(&self) -> Option<u32> {
        self.credited_minutes
    }

    /// Replace the typed text. Ignored once the entry is finished.
    pub fn set_input(&mut self, input: impl Into<String>) {
        if self.state == SessionState::Idle {
            self.input = input.into();
        }
    }

    /// Submit the current input.
    pub fn submit(&mut self) -> Option<Event> {
        let minutes = parse_minutes(&self.input)?;
        self.submit_minutes(minutes)
    }

    /// Replace the input and submit it.
    pub fn submit_input(&mut self, input: &str) -> Option<Event> {
        self.set_input(input);
        self.submit()
    }

    /// Submit a minute count directly. Zero is a no-op.
    pub fn submit_minutes(&mut self, minutes: u32) -> Option<Event> {
        if self.state != SessionState::Idle || minutes == 0 {
            return None;
        }
        self.state = SessionState::Completed;
        self.credited_minutes = Some(minutes);
        tracing::debug!(minutes, "manual entry submitted");
        Some(Event::SessionCompleted {
            mode: SessionMode::Manual,
            minutes,
            elapsed_secs: u64::from(minutes) * 60,
            auto_completed: false,
            at: Utc::now(),
        })
    }

    pub fn cancel(&mut self) -> Option<Event> {
        if self.state != SessionState::Idle {
            return None;
        }
        self.state = SessionState::Cancelled;
        Some(Event::SessionCancelled {
            mode: SessionMode::Manual,
            discarded_secs: 0,
            at: Utc::now(),
        })
    }
}

/// Positive whole minutes, or `None` for anything else.
fn parse_minutes(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|m| *m > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefilled_default_submits() {
        let mut entry = ManualEntry::new(30);
        assert_eq!(entry.input(), "30");
        let event = entry.submit().unwrap();
        assert_eq!(event.minutes_to_add(), Some(30));
        assert_eq!(entry.state(), SessionState::Completed);
    }

    #[test]
    fn invalid_input_stays_idle() {
        let mut entry = ManualEntry::new(30);
        for bad in ["", "abc", "0", "-5", "12.5"] {
            assert!(entry.submit_input(bad).is_none(), "input {bad:?}");
            assert_eq!(entry.state(), SessionState::Idle);
        }
        assert_eq!(entry.minutes_to_add(), None);
    }

    #[test]
    fn whitespace_is_trimmed() {
        let mut entry = ManualEntry::new(30);
        assert_eq!(entry.submit_input(" 45 ").unwrap().minutes_to_add(), Some(45));
    }

    #[test]
    fn submits_only_once() {
        let mut entry = ManualEntry::new(30);
        entry.submit_minutes(10);
        assert!(entry.submit_minutes(20).is_none());
        entry.set_input("99");
        assert_eq!(entry.input(), "30");
        assert_eq!(entry.minutes_to_add(), Some(10));
    }

    #[test]
    fn cancel_credits_nothing() {
        let mut entry = ManualEntry::new(30);
        assert!(entry.cancel().is_some());
        assert!(entry.submit().is_none());
        assert_eq!(entry.minutes_to_add(), None);
    }
}
