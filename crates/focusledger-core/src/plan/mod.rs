//! Weekly plans and the records they own.
//!
//! A [`WeeklyPlan`] owns its tasks and rewards outright. Nothing outside the
//! plan holds a task: callers address tasks by id through the plan, and
//! dropping the plan (see [`PlanBook::delete`]) drops every child with it.
//!
//! Derived metrics (totals, rates, rating) are never stored; they are
//! recomputed from the snapshot by [`crate::stats`].

mod book;
mod reward;
mod task;

pub use book::PlanBook;
pub use reward::RewardItem;
pub use task::TaskItem;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::TaskCategory;
use crate::error::{PlanError, ValidationError};
use crate::stats::{self, AttendanceRating};

/// Default weekly attendance budget in minutes.
pub const DEFAULT_ATTENDANCE_BUDGET: f64 = 3600.0;

/// One week's plan: a focus-time budget plus the tasks and rewards scored
/// against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    /// Unique across a [`PlanBook`]; fixed once the plan exists.
    week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Target focus minutes for the week.
    pub attendance_budget: f64,
    /// Carried-forward score from earlier weeks. Stored only; it is not part
    /// of any live total.
    #[serde(default)]
    pub previous_total_score: f64,
    #[serde(default)]
    tasks: Vec<TaskItem>,
    #[serde(default)]
    rewards: Vec<RewardItem>,
    pub created_at: DateTime<Utc>,
}

impl WeeklyPlan {
    /// Create an empty plan.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDateRange`] if `end_date` precedes
    /// `start_date`.
    pub fn new(
        week_number: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        attendance_budget: f64,
    ) -> Result<Self, ValidationError> {
        if end_date < start_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            week_number,
            start_date,
            end_date,
            attendance_budget,
            previous_total_score: 0.0,
            tasks: Vec::new(),
            rewards: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn week_number(&self) -> u32 {
        self.week_number
    }

    pub fn with_previous_total_score(mut self, score: f64) -> Self {
        self.previous_total_score = score;
        self
    }

    // ── Children ─────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[TaskItem] {
        &self.tasks
    }

    pub fn rewards(&self) -> &[RewardItem] {
        &self.rewards
    }

    pub fn task(&self, task_id: Uuid) -> Option<&TaskItem> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn tasks_in(&self, category: TaskCategory) -> impl Iterator<Item = &TaskItem> {
        self.tasks.iter().filter(move |t| t.category == category)
    }

    /// Append a task and return its id.
    pub fn add_task(&mut self, task: TaskItem) -> Uuid {
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Append a reward and return its id.
    pub fn add_reward(&mut self, reward: RewardItem) -> Uuid {
        let id = reward.id;
        self.rewards.push(reward);
        id
    }

    /// Merge a completed session's minutes into a task.
    ///
    /// Additive only; a zero delta is a no-op. Returns the task's new actual
    /// minutes.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::TaskNotFound`] if the task is not in this plan.
    pub fn record_minutes(&mut self, task_id: Uuid, delta: u32) -> Result<u32, PlanError> {
        let week_number = self.week_number;
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(PlanError::TaskNotFound { task_id })?;

        if delta == 0 {
            return Ok(task.actual_minutes());
        }

        let total = task.add_minutes(delta);
        tracing::info!(
            week = week_number,
            task = %task.name,
            added = delta,
            total,
            "recorded focus minutes"
        );
        Ok(total)
    }

    // ── Derived metrics ──────────────────────────────────────────────

    pub fn total_actual_minutes(&self) -> u64 {
        stats::total_actual_minutes(self)
    }

    pub fn total_actual_weight(&self) -> f64 {
        stats::total_actual_weight(self)
    }

    pub fn category_progress(&self, category: TaskCategory) -> f64 {
        stats::category_progress(self, category)
    }

    pub fn attendance_completion_rate(&self) -> f64 {
        stats::attendance_completion_rate(self)
    }

    pub fn attendance_rating(&self) -> AttendanceRating {
        stats::attendance_rating(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan() -> WeeklyPlan {
        WeeklyPlan::new(1, date(2026, 2, 16), date(2026, 2, 23), DEFAULT_ATTENDANCE_BUDGET).unwrap()
    }

    #[test]
    fn rejects_inverted_date_range() {
        let err = WeeklyPlan::new(1, date(2026, 2, 23), date(2026, 2, 16), 3600.0).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }

    #[test]
    fn new_plan_has_no_children_and_zero_baseline() {
        let plan = plan();
        assert!(plan.tasks().is_empty());
        assert!(plan.rewards().is_empty());
        assert_eq!(plan.previous_total_score, 0.0);
        assert_eq!(plan.attendance_budget, 3600.0);
    }

    #[test]
    fn record_minutes_accumulates() {
        let mut plan = plan();
        let id = plan.add_task(TaskItem::new("Exam prep", TaskCategory::Professional, 600));

        assert_eq!(plan.record_minutes(id, 25).unwrap(), 25);
        assert_eq!(plan.record_minutes(id, 40).unwrap(), 65);
        assert_eq!(plan.task(id).unwrap().actual_minutes(), 65);
    }

    #[test]
    fn record_zero_minutes_is_noop() {
        let mut plan = plan();
        let id = plan.add_task(
            TaskItem::new("Reading", TaskCategory::Reading, 60).with_actual_minutes(10),
        );
        assert_eq!(plan.record_minutes(id, 0).unwrap(), 10);
    }

    #[test]
    fn record_minutes_for_foreign_task_fails() {
        let mut plan = plan();
        let stranger = Uuid::new_v4();
        assert_eq!(
            plan.record_minutes(stranger, 5),
            Err(PlanError::TaskNotFound { task_id: stranger })
        );
    }

    #[test]
    fn previous_total_score_is_not_in_weight() {
        let mut plan = plan().with_previous_total_score(1000.0);
        plan.add_reward(RewardItem::new("Running", 9.0, 450.0));
        assert_eq!(plan.total_actual_weight(), 450.0);
    }

    #[test]
    fn plan_serialization_keeps_children() {
        let mut plan = plan();
        plan.add_task(TaskItem::new("Finance", TaskCategory::Extended, 600).with_actual_minutes(237));
        plan.add_reward(RewardItem::new("Running", 9.0, 450.0));

        let json = serde_json::to_string(&plan).unwrap();
        let decoded: WeeklyPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.tasks(), plan.tasks());
        assert_eq!(decoded.rewards(), plan.rewards());
        assert_eq!(decoded.total_actual_weight(), plan.total_actual_weight());
    }
}
