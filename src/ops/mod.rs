//! User-facing actions.
//!
//! Each action performs one store, aggregate, streak or calendar operation and
//! renders the outcome as text. Output goes to any `Write` so the same actions
//! serve the binary and the tests.

pub mod calendar;
pub mod entries;
pub mod settings;
pub mod summary;

use crate::config::{self, Config, GoalConfig};
use crate::errors::AppResult;
use crate::store::{CsvStore, EntryStore};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::debug;

/// Everything one invocation works with: paths, the store, the goals and the
/// date the invocation considers "today".
#[derive(Debug)]
pub struct Tracker {
    pub config: Config,
    pub store: CsvStore,
    pub goals: GoalConfig,
    pub today: NaiveDate,
}

impl Tracker {
    /// Prepares the data directory, loads the goals and bootstraps the store.
    ///
    /// # Errors
    ///
    /// Fails if the data directory, the store header or the default goal file
    /// cannot be written.
    pub fn open(config: Config, today: NaiveDate) -> AppResult<Self> {
        config::ensure_data_dir_exists(&config.data_dir)?;
        let goals = GoalConfig::load_or_init(&config.goals_file())?;
        let store = CsvStore::new(config.data_file());
        let existing = store.load()?;
        debug!("Opened tracker with {} entries", existing.len());

        Ok(Tracker {
            config,
            store,
            goals,
            today,
        })
    }
}

/// Asks a yes/no question until the answer is one of the two.
///
/// End of input counts as "no".
pub fn prompt_yes_no<R, W>(question: &str, input: &mut R, out: &mut W) -> AppResult<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{} (yes/no): ", question)?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }

        match answer.trim().to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => writeln!(out, "Please enter 'yes' or 'no'.")?,
        }
    }
}

/// Replaces the store with an empty one. Goals and profile are untouched.
pub fn reset<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<()> {
    tracker.store.replace_all(&[])?;
    writeln!(out, "Tracker has been reset.")?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::{rendered, tracker};
    use super::*;
    use crate::store::Entry;
    use std::fs;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn test_open_bootstraps_files() {
        let (tracker, _dir) = tracker(today());

        assert!(tracker.config.data_file().exists());
        assert!(tracker.config.goals_file().exists());
        assert_eq!(tracker.goals, GoalConfig::default());
    }

    #[test]
    fn test_reset_keeps_header_and_goals() {
        let (tracker, _dir) = tracker(today());
        GoalConfig::new(8.0, 3.0)
            .unwrap()
            .save(&tracker.config.goals_file())
            .unwrap();
        tracker.store.upsert(Entry::new(today())).unwrap();

        let output = rendered(|out| reset(&tracker, out));

        assert!(output.contains("reset"));
        assert!(tracker.store.load().unwrap().is_empty());
        let content = fs::read_to_string(tracker.config.data_file()).unwrap();
        assert!(content.starts_with("date,sleep,mood,water_intake,period,notes"));
        let goals = GoalConfig::load_or_init(&tracker.config.goals_file()).unwrap();
        assert_eq!(goals.sleep_goal_hours, 8.0);
    }

    #[test]
    fn test_prompt_yes_no_retries_until_valid() {
        let mut input = Cursor::new("maybe\nYES\n");
        let mut out = Vec::new();

        assert!(prompt_yes_no("Reset?", &mut input, &mut out).unwrap());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Please enter 'yes' or 'no'."));
    }

    #[test]
    fn test_prompt_yes_no_eof_is_no() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(!prompt_yes_no("Reset?", &mut input, &mut out).unwrap());
    }
}
