//! Sleep and water goals.
//!
//! Goals are a value loaded once per invocation and passed explicitly to the
//! streak and summary calls that need them.

use super::write_private_file;
use crate::constants::{DEFAULT_SLEEP_GOAL_HOURS, DEFAULT_WATER_GOAL_LITRES};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

fn default_sleep_goal() -> f64 {
    DEFAULT_SLEEP_GOAL_HOURS
}

fn default_water_goal() -> f64 {
    DEFAULT_WATER_GOAL_LITRES
}

/// The persisted goal record.
///
/// On disk this is `{"sleep_goal": 7.0, "water_goal": 2.0}`; missing keys take
/// their defaults.
///
/// # Examples
///
/// ```
/// use habitlog::GoalConfig;
///
/// let goals: GoalConfig = serde_json::from_str(r#"{"water_goal": 2.5}"#).unwrap();
/// assert_eq!(goals.sleep_goal_hours, 7.0);
/// assert_eq!(goals.water_goal_litres, 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Minimum hours of sleep for a day to count towards the sleep streak.
    #[serde(rename = "sleep_goal", default = "default_sleep_goal")]
    pub sleep_goal_hours: f64,
    /// Minimum litres of water for a day to count towards the water streak.
    #[serde(rename = "water_goal", default = "default_water_goal")]
    pub water_goal_litres: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        GoalConfig {
            sleep_goal_hours: DEFAULT_SLEEP_GOAL_HOURS,
            water_goal_litres: DEFAULT_WATER_GOAL_LITRES,
        }
    }
}

impl GoalConfig {
    /// Builds a goal record from user input.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Input` if either goal is negative or not a finite number.
    pub fn new(sleep_goal_hours: f64, water_goal_litres: f64) -> AppResult<Self> {
        let goals = GoalConfig {
            sleep_goal_hours,
            water_goal_litres,
        };
        goals.validate()?;
        Ok(goals)
    }

    fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("sleep goal", self.sleep_goal_hours),
            ("water goal", self.water_goal_litres),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Input(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Loads the goal record, creating it with defaults on first access.
    ///
    /// A file that cannot be read or parsed, or that holds negative goals, is
    /// discarded and regenerated with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if the regenerated file cannot be written.
    pub fn load_or_init(path: &Path) -> AppResult<Self> {
        if path.exists() {
            match Self::read(path) {
                Ok(goals) => {
                    debug!(
                        sleep_goal = goals.sleep_goal_hours,
                        water_goal = goals.water_goal_litres,
                        "Loaded goals"
                    );
                    return Ok(goals);
                }
                Err(e) => {
                    warn!("Discarding unreadable goal config {}: {}", path.display(), e);
                }
            }
        } else {
            info!("No goal config found, writing defaults");
        }

        let goals = GoalConfig::default();
        goals.save(path)?;
        Ok(goals)
    }

    fn read(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path)?;
        let goals: GoalConfig = serde_json::from_str(&raw)?;
        goals.validate()?;
        Ok(goals)
    }

    /// Persists the goal record, replacing the previous one.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_private_file(path, json.as_bytes())?;
        debug!("Saved goals to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_or_init_creates_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let goals = GoalConfig::load_or_init(&path).unwrap();

        assert_eq!(goals, GoalConfig::default());
        assert!(path.exists());
        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["sleep_goal"], 7.0);
        assert_eq!(value["water_goal"], 2.0);
    }

    #[test]
    fn test_malformed_config_is_regenerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ this is not json").unwrap();

        let goals = GoalConfig::load_or_init(&path).unwrap();

        assert_eq!(goals, GoalConfig::default());
        let reloaded = GoalConfig::load_or_init(&path).unwrap();
        assert_eq!(reloaded, GoalConfig::default());
    }

    #[test]
    fn test_negative_goal_in_file_is_regenerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sleep_goal": -1.0, "water_goal": 2.0}"#).unwrap();

        let goals = GoalConfig::load_or_init(&path).unwrap();
        assert_eq!(goals, GoalConfig::default());
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        GoalConfig::new(8.0, 2.5).unwrap().save(&path).unwrap();
        let goals = GoalConfig::load_or_init(&path).unwrap();

        assert_eq!(goals.sleep_goal_hours, 8.0);
        assert_eq!(goals.water_goal_litres, 2.5);
    }

    #[test]
    fn test_new_rejects_negative_and_nan() {
        assert!(matches!(GoalConfig::new(-1.0, 2.0), Err(AppError::Input(_))));
        assert!(matches!(
            GoalConfig::new(7.0, f64::NAN),
            Err(AppError::Input(_))
        ));
    }
}
