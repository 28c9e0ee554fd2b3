//! Core error types for focusledger-core.
//!
//! Scoring and session arithmetic never fail; these errors only surface at
//! the plan book and configuration edges.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Core error type for focusledger-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan book errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised while managing weekly plans and their tasks.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// Another plan already uses this week number
    #[error("A plan for week {week_number} already exists")]
    DuplicateWeek { week_number: u32 },

    #[error("No plan for week {week_number}")]
    WeekNotFound { week_number: u32 },

    #[error("Task {task_id} does not belong to this plan")]
    TaskNotFound { task_id: Uuid },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Invalid date range
    #[error("Invalid date range: end_date ({end}) is before start_date ({start})")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidValue { field, message } => {
                ConfigError::InvalidValue { key: field, message }
            }
            other => ConfigError::ParseFailed(other.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
