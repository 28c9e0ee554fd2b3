//! Statistics for weekly plans.
//!
//! This module turns raw planned/actual minutes into the weekly score,
//! per-category progress, attendance completion rate and its letter rating.

mod aggregate;
mod rating;

pub use aggregate::{
    attendance_completion_rate, attendance_percent, attendance_rating, category_progress,
    total_actual_minutes, total_actual_weight, CategoryProgress, WeeklySummary,
};

pub use rating::AttendanceRating;
