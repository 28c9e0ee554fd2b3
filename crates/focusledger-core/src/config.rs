//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The default weekly attendance budget and week length
//! - The recording mode offered first
//! - Countdown target bounds and stepper increment
//! - The manual entry pre-fill
//!
//! Configuration lives at `<config dir>/focusledger/config.toml` unless a path
//! is given explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ValidationError};
use crate::plan::DEFAULT_ATTENDANCE_BUDGET;
use crate::session::{CountdownLimits, SessionMode};

/// Plan defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_attendance_budget")]
    pub attendance_budget_minutes: f64,
    #[serde(default = "default_week_length_days")]
    pub week_length_days: u32,
}

/// Recording session defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub default_mode: SessionMode,
    #[serde(default = "default_manual_minutes")]
    pub manual_default_minutes: u32,
    #[serde(default = "default_countdown_minutes")]
    pub countdown_default_minutes: u32,
    #[serde(default = "default_countdown_min")]
    pub countdown_min_minutes: u32,
    #[serde(default = "default_countdown_max")]
    pub countdown_max_minutes: u32,
    #[serde(default = "default_countdown_step")]
    pub countdown_step_minutes: u32,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_attendance_budget() -> f64 {
    DEFAULT_ATTENDANCE_BUDGET
}
fn default_week_length_days() -> u32 {
    7
}
fn default_manual_minutes() -> u32 {
    30
}
fn default_countdown_minutes() -> u32 {
    25
}
fn default_countdown_min() -> u32 {
    1
}
fn default_countdown_max() -> u32 {
    120
}
fn default_countdown_step() -> u32 {
    5
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            attendance_budget_minutes: default_attendance_budget(),
            week_length_days: default_week_length_days(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_mode: SessionMode::default(),
            manual_default_minutes: default_manual_minutes(),
            countdown_default_minutes: default_countdown_minutes(),
            countdown_min_minutes: default_countdown_min(),
            countdown_max_minutes: default_countdown_max(),
            countdown_step_minutes: default_countdown_step(),
        }
    }
}

impl SessionConfig {
    pub fn countdown_limits(&self) -> CountdownLimits {
        CountdownLimits {
            min_minutes: self.countdown_min_minutes,
            max_minutes: self.countdown_max_minutes,
            step_minutes: self.countdown_step_minutes,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(n) if n.is_f64() => value
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?
                    .into(),
            ),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot assign a whole section".to_string()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default config file path.
    ///
    /// Set FOCUSLEDGER_ENV=dev to use the development directory.
    pub fn default_path() -> PathBuf {
        let base_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        let env = std::env::var("FOCUSLEDGER_ENV").unwrap_or_else(|_| "production".to_string());
        let dir = if env == "dev" {
            base_dir.join("focusledger-dev")
        } else {
            base_dir.join("focusledger")
        };
        dir.join("config.toml")
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from `path`, or return defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if its values fail [`Config::validate`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map_err(|e| match e {
                ConfigError::ParseFailed(message) => ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from [`Config::default_path`], returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::default_path()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let s = &self.session;
        if s.countdown_step_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "session.countdown_step_minutes".into(),
                message: "must be greater than zero".into(),
            });
        }
        if s.countdown_min_minutes == 0 || s.countdown_min_minutes > s.countdown_max_minutes {
            return Err(ValidationError::InvalidValue {
                field: "session.countdown_min_minutes".into(),
                message: format!(
                    "must be between 1 and countdown_max_minutes ({})",
                    s.countdown_max_minutes
                ),
            });
        }
        if !(s.countdown_min_minutes..=s.countdown_max_minutes).contains(&s.countdown_default_minutes)
        {
            return Err(ValidationError::InvalidValue {
                field: "session.countdown_default_minutes".into(),
                message: format!(
                    "must be within {}..={}",
                    s.countdown_min_minutes, s.countdown_max_minutes
                ),
            });
        }
        if self.plan.week_length_days == 0 {
            return Err(ValidationError::InvalidValue {
                field: "plan.week_length_days".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
