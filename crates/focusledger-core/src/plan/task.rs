//! Planned versus actual focus time for a single task.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::TaskCategory;

/// A task inside a weekly plan.
///
/// `actual_minutes` only grows, and only through
/// [`WeeklyPlan::record_minutes`](super::WeeklyPlan::record_minutes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
    /// Work type, e.g. "Network security".
    pub name: String,
    pub category: TaskCategory,
    pub planned_minutes: u32,
    actual_minutes: u32,
}

impl TaskItem {
    pub fn new(name: impl Into<String>, category: TaskCategory, planned_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            planned_minutes,
            actual_minutes: 0,
        }
    }

    /// Seed the actual minutes, e.g. when rebuilding a task from stored data.
    pub fn with_actual_minutes(mut self, actual_minutes: u32) -> Self {
        self.actual_minutes = actual_minutes;
        self
    }

    pub fn actual_minutes(&self) -> u32 {
        self.actual_minutes
    }

    /// actual / planned, or 0.0 when nothing was planned.
    pub fn completion_rate(&self) -> f64 {
        if self.planned_minutes == 0 {
            return 0.0;
        }
        self.actual_minutes as f64 / self.planned_minutes as f64
    }

    /// actual minutes x category multiplier.
    pub fn weighted_contribution(&self) -> f64 {
        self.actual_minutes as f64 * self.category.multiplier()
    }

    pub(crate) fn add_minutes(&mut self, delta: u32) -> u32 {
        self.actual_minutes = self.actual_minutes.saturating_add(delta);
        self.actual_minutes
    }
}
