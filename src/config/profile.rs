//! Optional user profile: name, date of birth and average cycle length.

use super::write_private_file;
use crate::constants::{DEFAULT_CYCLE_LENGTH_DAYS, MAX_CYCLE_LENGTH_DAYS, MIN_CYCLE_LENGTH_DAYS};
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH_DAYS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub dob: Option<NaiveDate>,
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: String::new(),
            dob: None,
            cycle_length: DEFAULT_CYCLE_LENGTH_DAYS,
        }
    }
}

impl Profile {
    /// Loads the profile; a missing or malformed file means "no profile".
    pub fn load(path: &Path) -> Option<Self> {
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("Ignoring malformed profile {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_private_file(path, json.as_bytes())
    }

    /// Checks the cycle length against the accepted range.
    pub fn set_cycle_length(&mut self, days: u32) -> AppResult<()> {
        if !(MIN_CYCLE_LENGTH_DAYS..=MAX_CYCLE_LENGTH_DAYS).contains(&days) {
            return Err(AppError::Input(format!(
                "cycle length must be between {} and {} days, got {}",
                MIN_CYCLE_LENGTH_DAYS, MAX_CYCLE_LENGTH_DAYS, days
            )));
        }
        self.cycle_length = days;
        Ok(())
    }

    /// Age in whole years on `today`, or `None` without a (past) date of birth.
    ///
    /// ```
    /// use habitlog::Profile;
    /// use chrono::NaiveDate;
    ///
    /// let profile = Profile {
    ///     dob: NaiveDate::from_ymd_opt(1995, 6, 20),
    ///     ..Profile::default()
    /// };
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 19).unwrap();
    /// assert_eq!(profile.age_on(today), Some(28));
    /// ```
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.dob?;
        if dob > today {
            return None;
        }
        let before_birthday = (today.month(), today.day()) < (dob.month(), dob.day());
        let years = today.year() - dob.year() - i32::from(before_birthday);
        u32::try_from(years).ok()
    }
}
