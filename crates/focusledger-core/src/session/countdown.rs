//! Target-based countdown session.
//!
//! The session holds no thread or clock. The caller delivers one `tick()`
//! per wall-clock second (or `advance(n)` for a batch); ticks outside
//! `Running` are ignored.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   Running (remaining hits 0)     -> Completed, credits the full target
//!   Idle | Running | Paused (stop) -> Completed, credits whole elapsed minutes
//!   Idle | Running | Paused        -> Cancelled, credits nothing
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{clock_mm_ss, SessionMode, SessionState};
use crate::events::Event;

/// Bounds and increment for the countdown target, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownLimits {
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub step_minutes: u32,
}

impl Default for CountdownLimits {
    fn default() -> Self {
        Self {
            min_minutes: 1,
            max_minutes: 120,
            step_minutes: 5,
        }
    }
}

impl CountdownLimits {
    /// Clamp a target into the limits. A countdown target is never below 1.
    pub fn clamp(&self, minutes: u32) -> u32 {
        let floor = self.min_minutes.max(1);
        minutes.max(floor).min(self.max_minutes.max(floor))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownSession {
    limits: CountdownLimits,
    target_minutes: u32,
    remaining_secs: u64,
    state: SessionState,
    /// Minutes to credit, set once the session completes.
    #[serde(default)]
    credited_minutes: Option<u32>,
}

impl CountdownSession {
    pub fn new(target_minutes: u32, limits: CountdownLimits) -> Self {
        let target_minutes = limits.clamp(target_minutes);
        Self {
            limits,
            target_minutes,
            remaining_secs: minutes_to_secs(target_minutes),
            state: SessionState::Idle,
            credited_minutes: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn target_minutes(&self) -> u32 {
        self.target_minutes
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        minutes_to_secs(self.target_minutes)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs().saturating_sub(self.remaining_secs)
    }

    pub fn minutes_to_add(&self) -> Option<u32> {
        self.credited_minutes
    }

    /// 0.0 .. 1.0 share of the target already counted down.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        self.elapsed_secs() as f64 / total as f64
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        clock_mm_ss(self.remaining_secs)
    }

    /// The target can only change before the first second is counted.
    pub fn is_adjustable(&self) -> bool {
        self.state == SessionState::Idle && self.remaining_secs == self.total_secs()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the target, clamped to the limits. `None` if the session is no
    /// longer adjustable or the target did not change.
    pub fn set_target(&mut self, minutes: u32) -> Option<Event> {
        if !self.is_adjustable() {
            return None;
        }
        let minutes = self.limits.clamp(minutes);
        if minutes == self.target_minutes {
            return None;
        }
        self.target_minutes = minutes;
        self.remaining_secs = minutes_to_secs(minutes);
        Some(Event::TargetAdjusted {
            target_minutes: minutes,
            at: Utc::now(),
        })
    }

    pub fn increase_target(&mut self) -> Option<Event> {
        let next = self.target_minutes.saturating_add(self.limits.step_minutes);
        self.set_target(next)
    }

    pub fn decrease_target(&mut self) -> Option<Event> {
        let next = self.target_minutes.saturating_sub(self.limits.step_minutes);
        self.set_target(next)
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Running;
                tracing::debug!(target_minutes = self.target_minutes, "countdown started");
                Some(Event::SessionStarted {
                    mode: SessionMode::Countdown,
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
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        self.state = SessionState::Running;
        Some(Event::SessionResumed {
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        })
    }

    /// Play/pause button: Idle or Paused starts, Running pauses.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Idle | SessionState::Paused => self.start(),
            _ => None,
        }
    }

    /// One wall-clock second.
    pub fn tick(&mut self) -> Option<Event> {
        self.advance(1)
    }

    /// Count down `secs` seconds at once. Reaching zero auto-completes and
    /// credits the whole target, however late the ticks arrived.
    pub fn advance(&mut self, secs: u64) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs == 0 {
            return Some(self.complete(self.target_minutes, true));
        }
        None
    }

    /// Stop early and credit whole elapsed minutes (partial minutes dropped).
    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Running | SessionState::Paused => {
                let minutes = secs_to_whole_minutes(self.elapsed_secs());
                Some(self.complete(minutes, false))
            }
            _ => None,
        }
    }

    /// Dismiss without stopping. Nothing is credited.
    pub fn cancel(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Running | SessionState::Paused => {
                self.state = SessionState::Cancelled;
                let discarded_secs = self.elapsed_secs();
                tracing::debug!(discarded_secs, "countdown cancelled");
                Some(Event::SessionCancelled {
                    mode: SessionMode::Countdown,
                    discarded_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, minutes: u32, auto_completed: bool) -> Event {
        self.state = SessionState::Completed;
        self.credited_minutes = Some(minutes);
        tracing::debug!(minutes, auto_completed, "countdown completed");
        Event::SessionCompleted {
            mode: SessionMode::Countdown,
            minutes,
            elapsed_secs: self.elapsed_secs(),
            auto_completed,
            at: Utc::now(),
        }
    }
}

fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes).saturating_mul(60)
}

fn secs_to_whole_minutes(secs: u64) -> u32 {
    u32::try_from(secs / 60).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(target: u32) -> CountdownSession {
        CountdownSession::new(target, CountdownLimits::default())
    }

    #[test]
    fn full_run_credits_exact_target() {
        let mut cd = session(25);
        cd.start();
        let mut completed = None;
        for _ in 0..1500 {
            if let Some(event) = cd.tick() {
                completed = Some(event);
            }
        }
        let event = completed.expect("countdown should complete");
        assert_eq!(event.minutes_to_add(), Some(25));
        assert_eq!(cd.state(), SessionState::Completed);
        assert_eq!(cd.minutes_to_add(), Some(25));
    }

    #[test]
    fn completes_on_tick_reaching_zero() {
        let mut cd = session(1);
        cd.start();
        assert!(cd.advance(59).is_none());
        assert_eq!(cd.remaining_secs(), 1);
        let event = cd.tick().unwrap();
        assert!(matches!(
            event,
            Event::SessionCompleted {
                minutes: 1,
                auto_completed: true,
                ..
            }
        ));
    }

    #[test]
    fn batched_ticks_overshooting_still_credit_target() {
        let mut cd = session(25);
        cd.start();
        let event = cd.advance(10_000).unwrap();
        assert_eq!(event.minutes_to_add(), Some(25));
        assert_eq!(cd.remaining_secs(), 0);
    }

    #[test]
    fn manual_stop_floors_elapsed_minutes() {
        let mut cd = session(25);
        cd.start();
        cd.advance(1200);
        assert_eq!(cd.remaining_secs(), 300);
        assert_eq!(cd.stop().unwrap().minutes_to_add(), Some(20));

        let mut cd = session(25);
        cd.start();
        cd.advance(119);
        assert_eq!(cd.stop().unwrap().minutes_to_add(), Some(1));
    }

    #[test]
    fn stop_before_start_credits_zero() {
        let mut cd = session(25);
        assert_eq!(cd.stop().unwrap().minutes_to_add(), Some(0));
        assert!(cd.stop().is_none());
    }

    #[test]
    fn ticks_ignored_unless_running() {
        let mut cd = session(25);
        assert!(cd.tick().is_none());
        assert_eq!(cd.remaining_secs(), 1500);

        cd.start();
        cd.advance(10);
        cd.toggle();
        assert_eq!(cd.state(), SessionState::Paused);
        cd.advance(100);
        assert_eq!(cd.elapsed_secs(), 10);

        cd.toggle();
        assert_eq!(cd.state(), SessionState::Running);
        cd.tick();
        assert_eq!(cd.elapsed_secs(), 11);
    }

    #[test]
    fn cancel_discards_elapsed_time() {
        let mut cd = session(25);
        cd.start();
        cd.advance(900);
        let event = cd.cancel().unwrap();
        assert!(matches!(event, Event::SessionCancelled { discarded_secs: 900, .. }));
        assert_eq!(cd.minutes_to_add(), None);
        assert!(cd.tick().is_none());
        assert!(cd.stop().is_none());
    }

    #[test]
    fn target_adjusts_only_while_idle_and_untouched() {
        let mut cd = session(25);
        assert!(cd.increase_target().is_some());
        assert_eq!(cd.target_minutes(), 30);
        assert_eq!(cd.remaining_secs(), 1800);

        cd.start();
        assert!(!cd.is_adjustable());
        assert!(cd.set_target(60).is_none());
        cd.pause();
        assert!(cd.decrease_target().is_none());
        assert_eq!(cd.target_minutes(), 30);
    }

    #[test]
    fn target_clamps_to_limits() {
        let mut cd = session(500);
        assert_eq!(cd.target_minutes(), 120);
        assert!(cd.increase_target().is_none());

        let mut cd = session(5);
        cd.decrease_target();
        assert_eq!(cd.target_minutes(), 1);
        cd.increase_target();
        assert_eq!(cd.target_minutes(), 6);
    }

    #[test]
    fn zero_floor_limits_still_start_at_one_minute() {
        let limits = CountdownLimits {
            min_minutes: 0,
            max_minutes: 0,
            step_minutes: 0,
        };
        let mut cd = CountdownSession::new(0, limits);
        assert_eq!(cd.target_minutes(), 1);
        assert_eq!(cd.remaining_secs(), 60);
        cd.start();
        assert!(cd.tick().is_none());
        assert_eq!(cd.state(), SessionState::Running);
    }

    #[test]
    fn progress_and_clock() {
        let mut cd = session(25);
        assert_eq!(cd.clock(), "25:00");
        assert_eq!(cd.progress(), 0.0);
        cd.start();
        cd.advance(750);
        assert_eq!(cd.clock(), "12:30");
        assert_eq!(cd.progress(), 0.5);
    }
}
