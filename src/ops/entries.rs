//! Adding, editing, deleting and listing entries.

use super::Tracker;
use crate::aggregate::last_n;
use crate::cli::EntryFields;
use crate::constants::STORE_HEADER;
use crate::errors::{AppError, AppResult};
use crate::store::{Entry, EntryStore};
use chrono::NaiveDate;
use std::io::Write;
use tracing::info;

/// An entry field that `edit --clear` can empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntryField {
    Sleep,
    Mood,
    Water,
    Notes,
}

/// Saves the entry for `date` (default: today) built from `fields` alone.
///
/// Whatever was stored for that date before is replaced in full.
pub fn add_entry<W: Write>(
    tracker: &Tracker,
    date: Option<NaiveDate>,
    fields: EntryFields,
    out: &mut W,
) -> AppResult<Entry> {
    let date = date.unwrap_or(tracker.today);
    let entry = Entry {
        date,
        sleep_hours: fields.sleep,
        mood: fields.mood,
        water_litres: fields.water,
        period: fields.period.unwrap_or(false),
        notes: fields.notes.filter(|notes| !notes.is_empty()),
    };

    let replaced = tracker.store.get(date)?.is_some();
    tracker.store.upsert(entry.clone())?;
    info!(%date, replaced, "Saved entry");

    if replaced {
        writeln!(out, "Replaced the entry for {}.", date)?;
    } else {
        writeln!(out, "Your entry for {} has been saved.", date)?;
    }
    Ok(entry)
}

/// Applies `fields` and `clear` on top of the stored entry for `date`.
///
/// # Errors
///
/// Returns `AppError::Input` without writing if no entry exists for `date`.
pub fn edit_entry<W: Write>(
    tracker: &Tracker,
    date: NaiveDate,
    fields: EntryFields,
    clear: &[EntryField],
    out: &mut W,
) -> AppResult<Entry> {
    let mut entry = tracker
        .store
        .get(date)?
        .ok_or_else(|| AppError::Input(format!("No entry found for {}", date)))?;

    for field in clear {
        match field {
            EntryField::Sleep => entry.sleep_hours = None,
            EntryField::Mood => entry.mood = None,
            EntryField::Water => entry.water_litres = None,
            EntryField::Notes => entry.notes = None,
        }
    }
    if fields.sleep.is_some() {
        entry.sleep_hours = fields.sleep;
    }
    if fields.mood.is_some() {
        entry.mood = fields.mood;
    }
    if fields.water.is_some() {
        entry.water_litres = fields.water;
    }
    if let Some(period) = fields.period {
        entry.period = period;
    }
    if let Some(notes) = fields.notes {
        entry.notes = Some(notes).filter(|notes| !notes.is_empty());
    }

    tracker.store.upsert(entry.clone())?;
    info!(%date, "Edited entry");
    writeln!(out, "Entry updated.")?;
    render_entries(std::slice::from_ref(&entry), out)?;
    Ok(entry)
}

pub fn delete_entry<W: Write>(tracker: &Tracker, date: NaiveDate, out: &mut W) -> AppResult<bool> {
    let removed = tracker.store.delete(date)?;
    if removed {
        info!(%date, "Deleted entry");
        writeln!(out, "Entry for {} deleted.", date)?;
    } else {
        writeln!(out, "No entry found for {}.", date)?;
    }
    Ok(removed)
}

pub fn show_recent<W: Write>(tracker: &Tracker, count: usize, out: &mut W) -> AppResult<()> {
    let entries = tracker.store.load()?;
    if entries.is_empty() {
        writeln!(out, "No entries found yet. Please add data first.")?;
        return Ok(());
    }
    let recent = last_n(&entries, count);
    writeln!(out, "Last {} entries:", recent.len())?;
    render_entries(&recent, out)
}

pub fn show_all<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<()> {
    let entries = tracker.store.load()?;
    if entries.is_empty() {
        writeln!(out, "No entries yet.")?;
        return Ok(());
    }
    writeln!(out, "All tracked entries:")?;
    render_entries(&entries, out)
}

/// Writes entries one per line under the store header.
pub fn render_entries<W: Write>(entries: &[Entry], out: &mut W) -> AppResult<()> {
    writeln!(out, "{}", STORE_HEADER.join(", "))?;
    for entry in entries {
        writeln!(out, "{}", entry.to_fields().join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::{rendered, tracker};
    use crate::store::Mood;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn fields(sleep: f64, mood: Mood) -> EntryFields {
        EntryFields {
            sleep: Some(sleep),
            mood: Some(mood),
            water: Some(2.0),
            period: None,
            notes: Some("note".to_string()),
        }
    }

    #[test]
    fn test_add_defaults_to_today_and_replaces() {
        let (tracker, _dir) = tracker(date(12));

        let first = rendered(|out| add_entry(&tracker, None, fields(7.0, Mood::Happy), out).map(|_| ()));
        assert!(first.contains("2024-06-12"));

        let sparse = EntryFields {
            mood: Some(Mood::Low),
            ..EntryFields::default()
        };
        let second = rendered(|out| add_entry(&tracker, None, sparse, out).map(|_| ()));
        assert!(second.contains("Replaced"));

        let stored = tracker.store.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].sleep_hours, None, "add replaces the whole entry");
        assert_eq!(stored[0].mood, Some(Mood::Low));
    }

    #[test]
    fn test_edit_merges_and_clears() {
        let (tracker, _dir) = tracker(date(12));
        add_entry(&tracker, Some(date(3)), fields(6.0, Mood::Neutral), &mut Vec::new()).unwrap();

        let patch = EntryFields {
            water: Some(3.5),
            period: Some(true),
            ..EntryFields::default()
        };
        let entry = edit_entry(
            &tracker,
            date(3),
            patch,
            &[EntryField::Notes, EntryField::Mood],
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(entry.sleep_hours, Some(6.0));
        assert_eq!(entry.water_litres, Some(3.5));
        assert_eq!(entry.mood, None);
        assert_eq!(entry.notes, None);
        assert!(entry.period);
        assert_eq!(tracker.store.get(date(3)).unwrap(), Some(entry));
    }

    #[test]
    fn test_edit_missing_entry_is_rejected_without_write() {
        let (tracker, _dir) = tracker(date(12));

        let result = edit_entry(&tracker, date(1), EntryFields::default(), &[], &mut Vec::new());

        assert!(matches!(result, Err(AppError::Input(_))));
        assert!(tracker.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_delete_reports_absent() {
        let (tracker, _dir) = tracker(date(12));
        add_entry(&tracker, Some(date(4)), fields(8.0, Mood::Happy), &mut Vec::new()).unwrap();

        assert!(delete_entry(&tracker, date(4), &mut Vec::new()).unwrap());
        let output = rendered(|out| delete_entry(&tracker, date(4), out).map(|_| ()));
        assert!(output.contains("No entry found"));
    }

    #[test]
    fn test_show_recent_limits_and_orders() {
        let (tracker, _dir) = tracker(date(12));
        for day in [9, 1, 5, 7] {
            add_entry(&tracker, Some(date(day)), fields(7.0, Mood::Happy), &mut Vec::new()).unwrap();
        }

        let output = rendered(|out| show_recent(&tracker, 2, out));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Last 2 entries:");
        assert_eq!(lines[1], "date, sleep, mood, water_intake, period, notes");
        assert!(lines[2].starts_with("2024-06-07"));
        assert!(lines[3].starts_with("2024-06-09"));
    }

    #[test]
    fn test_show_all_empty() {
        let (tracker, _dir) = tracker(date(12));
        assert_eq!(rendered(|out| show_all(&tracker, out)), "No entries yet.\n");
    }
}
