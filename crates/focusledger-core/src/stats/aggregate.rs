//! Weekly plan aggregation.
//!
//! Every function here is a pure read of a [`WeeklyPlan`] snapshot. They can
//! be called at any time, including while a recording session is running;
//! they simply see the task totals as last committed.

use serde::{Deserialize, Serialize};

use super::rating::AttendanceRating;
use crate::category::{TaskCategory, ThemeColor};
use crate::plan::WeeklyPlan;

/// Sum of actual minutes across all tasks. Uncapped.
pub fn total_actual_minutes(plan: &WeeklyPlan) -> u64 {
    plan.tasks()
        .iter()
        .map(|t| u64::from(t.actual_minutes()))
        .sum()
}

/// actual / planned over the tasks of one category, 0.0 if nothing is
/// planned in it.
pub fn category_progress(plan: &WeeklyPlan, category: TaskCategory) -> f64 {
    let (planned, actual) = plan
        .tasks_in(category)
        .fold((0u64, 0u64), |(planned, actual), t| {
            (
                planned + u64::from(t.planned_minutes),
                actual + u64::from(t.actual_minutes()),
            )
        });

    if planned == 0 {
        return 0.0;
    }
    actual as f64 / planned as f64
}

/// Weighted task minutes plus raw reward scores.
///
/// Rewards are a separate bonus channel and are never multiplied.
pub fn total_actual_weight(plan: &WeeklyPlan) -> f64 {
    let task_weight: f64 = plan.tasks().iter().map(|t| t.weighted_contribution()).sum();
    let reward_score: f64 = plan.rewards().iter().map(|r| r.score).sum();
    task_weight + reward_score
}

/// Actual minutes over the attendance budget, 0.0 when the budget is not
/// positive. Unbounded above 1.0.
pub fn attendance_completion_rate(plan: &WeeklyPlan) -> f64 {
    if plan.attendance_budget <= 0.0 || plan.attendance_budget.is_nan() {
        return 0.0;
    }
    total_actual_minutes(plan) as f64 / plan.attendance_budget
}

pub fn attendance_rating(plan: &WeeklyPlan) -> AttendanceRating {
    AttendanceRating::from_rate(attendance_completion_rate(plan))
}

/// Completion rate as a whole percentage, truncated.
pub fn attendance_percent(plan: &WeeklyPlan) -> u32 {
    let pct = (attendance_completion_rate(plan) * 100.0).floor();
    if pct >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        pct as u32
    }
}

/// Progress for one category ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category: TaskCategory,
    pub color: ThemeColor,
    pub planned_minutes: u64,
    pub actual_minutes: u64,
    /// actual / planned, unbounded.
    pub ratio: f64,
}

/// Every derived weekly figure, computed in one pass for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_number: u32,
    pub total_actual_minutes: u64,
    pub attendance_budget: f64,
    pub total_actual_weight: f64,
    pub attendance_completion_rate: f64,
    /// Truncated whole percent of the completion rate.
    pub attendance_percent: u32,
    /// Completion rate clamped to 1.0 for progress bars.
    pub attendance_bar_fill: f64,
    pub attendance_rating: AttendanceRating,
    pub rating_color: ThemeColor,
    pub previous_total_score: f64,
    pub categories: Vec<CategoryProgress>,
}

impl WeeklySummary {
    pub fn from_plan(plan: &WeeklyPlan) -> Self {
        let rate = attendance_completion_rate(plan);
        let rating = AttendanceRating::from_rate(rate);

        let categories = TaskCategory::ALL
            .iter()
            .map(|&category| {
                let planned_minutes = plan
                    .tasks_in(category)
                    .map(|t| u64::from(t.planned_minutes))
                    .sum();
                let actual_minutes = plan
                    .tasks_in(category)
                    .map(|t| u64::from(t.actual_minutes()))
                    .sum();
                CategoryProgress {
                    category,
                    color: category.color(),
                    planned_minutes,
                    actual_minutes,
                    ratio: category_progress(plan, category),
                }
            })
            .collect();

        Self {
            week_number: plan.week_number(),
            total_actual_minutes: total_actual_minutes(plan),
            attendance_budget: plan.attendance_budget,
            total_actual_weight: total_actual_weight(plan),
            attendance_completion_rate: rate,
            attendance_percent: attendance_percent(plan),
            attendance_bar_fill: rate.min(1.0),
            attendance_rating: rating,
            rating_color: rating.color(),
            previous_total_score: plan.previous_total_score,
            categories,
        }
    }

    pub fn category(&self, category: TaskCategory) -> Option<&CategoryProgress> {
        self.categories.iter().find(|c| c.category == category)
    }
}
