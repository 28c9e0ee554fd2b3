//! The set of weekly plans, keyed by their unique week number.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::WeeklyPlan;
use crate::config::PlanConfig;
use crate::error::{PlanError, Result};

/// All known weekly plans.
///
/// Week numbers are unique. Deleting a plan removes its tasks and rewards
/// with it since the plan is their only owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeeklyPlan>", into = "Vec<WeeklyPlan>")]
pub struct PlanBook {
    plans: BTreeMap<u32, WeeklyPlan>,
}

impl PlanBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Insert a plan.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateWeek`] if the week number is taken.
    pub fn insert(&mut self, plan: WeeklyPlan) -> Result<&mut WeeklyPlan, PlanError> {
        let week_number = plan.week_number();
        if self.plans.contains_key(&week_number) {
            return Err(PlanError::DuplicateWeek { week_number });
        }
        tracing::info!(week = week_number, "created weekly plan");
        Ok(self.plans.entry(week_number).or_insert(plan))
    }

    /// Create the plan following the latest one (week 1 for an empty book),
    /// spanning `week_length_days` from `start_date` with the configured budget.
    pub fn start_next_week(
        &mut self,
        start_date: NaiveDate,
        config: &PlanConfig,
    ) -> Result<&mut WeeklyPlan> {
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(config.week_length_days)))
            .unwrap_or(NaiveDate::MAX);
        let plan = WeeklyPlan::new(
            self.next_week_number(),
            start_date,
            end_date,
            config.attendance_budget_minutes,
        )?;
        Ok(self.insert(plan)?)
    }

    pub fn next_week_number(&self) -> u32 {
        self.plans
            .keys()
            .next_back()
            .map(|latest| latest.saturating_add(1))
            .unwrap_or(1)
    }

    pub fn get(&self, week_number: u32) -> Option<&WeeklyPlan> {
        self.plans.get(&week_number)
    }

    pub fn get_mut(&mut self, week_number: u32) -> Option<&mut WeeklyPlan> {
        self.plans.get_mut(&week_number)
    }

    /// The plan with the highest week number.
    pub fn current(&self) -> Option<&WeeklyPlan> {
        self.plans.values().next_back()
    }

    pub fn current_mut(&mut self) -> Option<&mut WeeklyPlan> {
        self.plans.values_mut().next_back()
    }

    /// Plans newest first.
    pub fn iter_latest_first(&self) -> impl Iterator<Item = &WeeklyPlan> {
        self.plans.values().rev()
    }

    /// Remove a plan along with all of its tasks and rewards.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::WeekNotFound`] if there is no such plan.
    pub fn delete(&mut self, week_number: u32) -> Result<WeeklyPlan, PlanError> {
        let plan = self
            .plans
            .remove(&week_number)
            .ok_or(PlanError::WeekNotFound { week_number })?;
        tracing::info!(
            week = week_number,
            tasks = plan.tasks().len(),
            rewards = plan.rewards().len(),
            "deleted weekly plan"
        );
        Ok(plan)
    }
}

impl TryFrom<Vec<WeeklyPlan>> for PlanBook {
    type Error = PlanError;

    /// Rebuild the book from stored plans, keyed by each plan's own week.
    fn try_from(plans: Vec<WeeklyPlan>) -> Result<Self, PlanError> {
        let mut book = PlanBook::new();
        for plan in plans {
            book.insert(plan)?;
        }
        Ok(book)
    }
}

impl From<PlanBook> for Vec<WeeklyPlan> {
    fn from(book: PlanBook) -> Self {
        book.plans.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::TaskCategory;
    use crate::error::CoreError;
    use crate::plan::{RewardItem, TaskItem};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_numbers_are_unique() {
        let mut book = PlanBook::new();
        book.insert(WeeklyPlan::new(3, date(2026, 1, 5), date(2026, 1, 12), 3600.0).unwrap())
            .unwrap();
        let err = book
            .insert(WeeklyPlan::new(3, date(2026, 1, 12), date(2026, 1, 19), 1200.0).unwrap())
            .unwrap_err();
        assert_eq!(err, PlanError::DuplicateWeek { week_number: 3 });
        assert_eq!(book.get(3).unwrap().attendance_budget, 3600.0);
    }

    #[test]
    fn start_next_week_follows_latest() {
        let mut book = PlanBook::new();
        let config = PlanConfig::default();

        let first = book.start_next_week(date(2026, 2, 16), &config).unwrap();
        assert_eq!(first.week_number(), 1);
        assert_eq!(first.end_date, date(2026, 2, 23));
        assert_eq!(first.attendance_budget, 3600.0);

        book.insert(WeeklyPlan::new(7, date(2026, 3, 2), date(2026, 3, 9), 3600.0).unwrap())
            .unwrap();
        let next = book.start_next_week(date(2026, 3, 9), &config).unwrap();
        assert_eq!(next.week_number(), 8);
    }

    #[test]
    fn current_is_highest_week() {
        let mut book = PlanBook::new();
        assert!(book.current().is_none());
        for week in [2, 5, 3] {
            book.insert(WeeklyPlan::new(week, date(2026, 1, 1), date(2026, 1, 8), 3600.0).unwrap())
                .unwrap();
        }
        assert_eq!(book.current().unwrap().week_number(), 5);
        let order: Vec<_> = book.iter_latest_first().map(|p| p.week_number()).collect();
        assert_eq!(order, vec![5, 3, 2]);
    }

    #[test]
    fn delete_cascades_children() {
        let mut book = PlanBook::new();
        let plan = book.start_next_week(date(2026, 2, 16), &PlanConfig::default()).unwrap();
        plan.add_task(TaskItem::new("Exam prep", TaskCategory::Professional, 600));
        plan.add_reward(RewardItem::new("Running", 9.0, 450.0));

        let removed = book.delete(1).unwrap();
        assert_eq!(removed.tasks().len(), 1);
        assert_eq!(removed.rewards().len(), 1);
        assert!(book.is_empty());
        assert_eq!(book.delete(1).unwrap_err(), PlanError::WeekNotFound { week_number: 1 });
    }

    #[test]
    fn duplicate_insert_converts_to_core_error() {
        let mut book = PlanBook::new();
        book.insert(WeeklyPlan::new(1, date(2026, 1, 1), date(2026, 1, 8), 3600.0).unwrap())
            .unwrap();
        assert_eq!(book.next_week_number(), 2);
        let err = book.insert(WeeklyPlan::new(1, date(2026, 1, 1), date(2026, 1, 8), 1.0).unwrap());
        assert!(matches!(CoreError::from(err.unwrap_err()), CoreError::Plan(_)));
    }

    #[test]
    fn stored_book_is_keyed_by_plan_week() {
        let mut book = PlanBook::new();
        let config = PlanConfig::default();
        book.start_next_week(date(2026, 2, 16), &config).unwrap();
        book.start_next_week(date(2026, 2, 23), &config).unwrap();

        let json = serde_json::to_string(&book).unwrap();
        let decoded: PlanBook = serde_json::from_str(&json).unwrap();
        let weeks: Vec<_> = decoded.iter_latest_first().map(|p| p.week_number()).collect();
        assert_eq!(weeks, vec![2, 1]);
        assert_eq!(decoded.next_week_number(), 3);
    }

    #[test]
    fn stored_book_with_repeated_week_is_rejected() {
        let plan = WeeklyPlan::new(9, date(2026, 1, 1), date(2026, 1, 8), 3600.0).unwrap();
        let json = serde_json::to_string(&vec![plan.clone(), plan]).unwrap();
        let err = serde_json::from_str::<PlanBook>(&json).unwrap_err();
        assert!(err.to_string().contains("week 9 already exists"));
    }

    #[test]
    fn borrowed_plan_keeps_its_week() {
        let mut book = PlanBook::new();
        book.insert(WeeklyPlan::new(1, date(2026, 1, 1), date(2026, 1, 8), 3600.0).unwrap())
            .unwrap();
        book.get_mut(1).unwrap().attendance_budget = 1200.0;
        assert_eq!(book.get(1).unwrap().week_number(), 1);

        book.insert(WeeklyPlan::new(5, date(2026, 2, 2), date(2026, 2, 9), 3600.0).unwrap())
            .unwrap();
        let err = book
            .insert(WeeklyPlan::new(5, date(2026, 2, 2), date(2026, 2, 9), 3600.0).unwrap())
            .unwrap_err();
        assert_eq!(err, PlanError::DuplicateWeek { week_number: 5 });
        let weeks: Vec<_> = book.iter_latest_first().map(|p| p.week_number()).collect();
        assert_eq!(weeks, vec![5, 1]);
    }
}
