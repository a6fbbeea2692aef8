//! Goal and profile settings.

use super::Tracker;
use crate::config::{GoalConfig, Profile};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::io::Write;
use tracing::info;

/// Shows the goals, or replaces the given ones and saves immediately.
///
/// A goal left out keeps its current value.
pub fn goals<W: Write>(
    tracker: &mut Tracker,
    sleep: Option<f64>,
    water: Option<f64>,
    out: &mut W,
) -> AppResult<GoalConfig> {
    if sleep.is_some() || water.is_some() {
        let updated = GoalConfig::new(
            sleep.unwrap_or(tracker.goals.sleep_goal_hours),
            water.unwrap_or(tracker.goals.water_goal_litres),
        )?;
        updated.save(&tracker.config.goals_file())?;
        tracker.goals = updated;
        info!(
            sleep_goal = updated.sleep_goal_hours,
            water_goal = updated.water_goal_litres,
            "Updated goals"
        );
        writeln!(out, "Goals updated successfully!")?;
    }

    writeln!(out, "Sleep goal: >= {} hrs", tracker.goals.sleep_goal_hours)?;
    writeln!(out, "Water goal: >= {} L", tracker.goals.water_goal_litres)?;
    Ok(tracker.goals)
}

/// Profile fields to change; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub cycle_length: Option<u32>,
}

impl ProfileUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.dob.is_none() && self.cycle_length.is_none()
    }
}

/// Shows the profile, creating or updating it first when `update` names any field.
///
/// # Errors
///
/// Creating a profile requires a name, and the cycle length must lie in 18..=45.
/// Nothing is saved when either check fails.
pub fn profile<W: Write>(tracker: &Tracker, update: ProfileUpdate, out: &mut W) -> AppResult<Option<Profile>> {
    let path = tracker.config.profile_file();
    let existing = Profile::load(&path);

    let current = if update.is_empty() {
        existing
    } else {
        let mut profile = match existing {
            Some(profile) => profile,
            None if update.name.is_some() => Profile::default(),
            None => {
                return Err(AppError::Input(
                    "No profile yet; pass --name to create one".to_string(),
                ))
            }
        };

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Input("Name must not be empty".to_string()));
            }
            profile.name = name;
        }
        if let Some(dob) = update.dob {
            if dob > tracker.today {
                return Err(AppError::Input(format!("Date of birth {} is in the future", dob)));
            }
            profile.dob = Some(dob);
        }
        if let Some(days) = update.cycle_length {
            profile.set_cycle_length(days)?;
        }

        profile.save(&path)?;
        info!("Saved profile");
        writeln!(out, "Profile saved.")?;
        Some(profile)
    };

    match &current {
        Some(profile) => {
            writeln!(out, "Name: {}", profile.name)?;
            match profile.dob {
                Some(dob) => writeln!(out, "Date of birth: {}", dob)?,
                None => writeln!(out, "Date of birth: not set")?,
            }
            if let Some(age) = profile.age_on(tracker.today) {
                writeln!(out, "Age: {}", age)?;
            }
            writeln!(out, "Cycle length: {} days", profile.cycle_length)?;
        }
        None => writeln!(out, "No profile yet. Create one with `habitlog profile --name <NAME>`.")?,
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::{rendered, tracker};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_goals_show_defaults() {
        let (mut tracker, _dir) = tracker(today());
        let output = rendered(|out| goals(&mut tracker, None, None, out).map(|_| ()));
        assert_eq!(output, "Sleep goal: >= 7 hrs\nWater goal: >= 2 L\n");
    }

    #[test]
    fn test_goals_partial_update_persists() {
        let (mut tracker, _dir) = tracker(today());

        let updated = goals(&mut tracker, Some(8.5), None, &mut Vec::new()).unwrap();

        assert_eq!(updated, GoalConfig::new(8.5, 2.0).unwrap());
        assert_eq!(tracker.goals, updated);
        let reloaded = GoalConfig::load_or_init(&tracker.config.goals_file()).unwrap();
        assert_eq!(reloaded, updated);
    }

    #[test]
    fn test_profile_requires_name_to_create() {
        let (tracker, _dir) = tracker(today());
        let update = ProfileUpdate {
            cycle_length: Some(30),
            ..ProfileUpdate::default()
        };

        let result = profile(&tracker, update, &mut Vec::new());

        assert!(matches!(result, Err(AppError::Input(_))));
        assert!(!tracker.config.profile_file().exists());
    }

    #[test]
    fn test_profile_create_then_update() {
        let (tracker, _dir) = tracker(today());
        let create = ProfileUpdate {
            name: Some("Alex".to_string()),
            dob: NaiveDate::from_ymd_opt(1990, 7, 2),
            ..ProfileUpdate::default()
        };
        profile(&tracker, create, &mut Vec::new()).unwrap();

        let update = ProfileUpdate {
            cycle_length: Some(31),
            ..ProfileUpdate::default()
        };
        let output = rendered(|out| profile(&tracker, update, out).map(|_| ()));

        assert!(output.contains("Name: Alex"));
        assert!(output.contains("Age: 33"));
        assert!(output.contains("Cycle length: 31 days"));
    }

    #[test]
    fn test_profile_rejects_out_of_range_cycle() {
        let (tracker, _dir) = tracker(today());
        let update = ProfileUpdate {
            name: Some("Alex".to_string()),
            cycle_length: Some(60),
            ..ProfileUpdate::default()
        };

        assert!(profile(&tracker, update, &mut Vec::new()).is_err());
        assert!(Profile::load(&tracker.config.profile_file()).is_none());
    }
}
