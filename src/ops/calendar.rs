//! Period calendar and period listing actions.

use super::Tracker;
use crate::aggregate::period_dates;
use crate::calendar::{build_month_grid, toggle_period, DayCell, MonthGrid};
use crate::config::Profile;
use crate::errors::{AppError, AppResult};
use crate::store::{parse_date, EntryStore};
use crate::streak::cycle_report;
use chrono::{Datelike, NaiveDate};
use std::io::Write;

const WEEKDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Resolves a toggle target: a day of the shown month, or a full date.
fn resolve_toggle(raw: &str, year: i32, month: u32) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = raw.parse::<u32>() {
        if raw.len() <= 2 {
            return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                AppError::Input(format!("{}-{:02} has no day {}", year, month, day))
            });
        }
    }
    parse_date(raw).map_err(|e| AppError::Input(format!("Invalid date '{}': {}", raw, e)))
}

/// Day number with its markers: `*` period day, `~` part of a multi-day run,
/// brackets for today.
fn render_cell(cell: &DayCell) -> String {
    match cell {
        DayCell::Padding => "     ".to_string(),
        DayCell::Day(day) => {
            let marker = if day.in_streak {
                '~'
            } else if day.is_period_day {
                '*'
            } else {
                ' '
            };
            let (open, close) = if day.is_today { ('[', ']') } else { (' ', ' ') };
            format!("{}{:>2}{}{}", open, day.date.day(), marker, close)
        }
    }
}

fn render_grid<W: Write>(grid: &MonthGrid, out: &mut W) -> AppResult<()> {
    writeln!(out, "{}", grid.title())?;
    let header: Vec<String> = WEEKDAY_HEADER.iter().map(|name| format!(" {:>2}  ", name)).collect();
    writeln!(out, "{}", header.concat().trim_end())?;
    for week in &grid.weeks {
        let row: Vec<String> = week.iter().map(render_cell).collect();
        writeln!(out, "{}", row.concat().trim_end())?;
    }
    writeln!(out, "* period day   ~ multi-day period   [ ] today")?;
    Ok(())
}

/// Shows the calendar for `month` (default: the current month), flipping the
/// period flag of `toggle` first when given.
///
/// # Errors
///
/// An unparseable toggle target is an `AppError::Input` and nothing is written.
pub fn show_calendar<W: Write>(
    tracker: &Tracker,
    month: Option<(i32, u32)>,
    toggle: Option<&str>,
    out: &mut W,
) -> AppResult<()> {
    let (year, month) = month.unwrap_or((tracker.today.year(), tracker.today.month()));

    if let Some(raw) = toggle {
        let date = resolve_toggle(raw, year, month)?;
        let entry = toggle_period(&tracker.store, date)?;
        let state = if entry.period { "marked as" } else { "removed from" };
        writeln!(out, "{} {} period days.", date, state)?;
        writeln!(out)?;
    }

    let entries = tracker.store.load()?;
    let grid = build_month_grid(year, month, tracker.today, &entries)?;
    render_grid(&grid, out)
}

/// Lists period dates, their runs and cycle statistics.
pub fn show_periods<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<()> {
    let entries = tracker.store.load()?;
    let dates = period_dates(&entries);

    writeln!(out, "Period days tracked:")?;
    if dates.is_empty() {
        writeln!(out, "No period days recorded.")?;
        return Ok(());
    }
    for date in &dates {
        writeln!(out, "- {}", date)?;
    }

    let fallback = Profile::load(&tracker.config.profile_file()).map(|profile| profile.cycle_length);
    let report = cycle_report(&dates, fallback);

    writeln!(out)?;
    writeln!(out, "Period runs:")?;
    for run in &report.runs {
        writeln!(out, "- {} to {} ({} day(s))", run.start, run.end, run.days())?;
    }
    if !report.cycle_lengths.is_empty() {
        let lengths: Vec<String> = report.cycle_lengths.iter().map(i64::to_string).collect();
        writeln!(out, "Cycle lengths: {} days", lengths.join(", "))?;
    }
    if let Some(average) = report.average_cycle_length {
        writeln!(out, "Average cycle length: {:.1} days", average)?;
    }
    if let Some(next) = report.predicted_next_start {
        writeln!(out, "Predicted next period: {}", next)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::{rendered, tracker};
    use crate::store::Entry;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn period(m: u32, d: u32) -> Entry {
        Entry {
            period: true,
            ..Entry::new(date(m, d))
        }
    }

    #[test]
    fn test_resolve_toggle_day_or_date() {
        assert_eq!(resolve_toggle("7", 2024, 2).unwrap(), date(2, 7));
        assert_eq!(resolve_toggle("2024-03-01", 2024, 2).unwrap(), date(3, 1));
        assert_eq!(resolve_toggle("20240301", 2024, 2).unwrap(), date(3, 1));
        assert!(matches!(resolve_toggle("30", 2024, 2), Err(AppError::Input(_))));
        assert!(matches!(resolve_toggle("soon", 2024, 2), Err(AppError::Input(_))));
    }

    #[test]
    fn test_calendar_renders_markers() {
        let (tracker, _dir) = tracker(date(2, 6));
        for d in [5, 6, 20] {
            tracker.store.upsert(period(2, d)).unwrap();
        }

        let output = rendered(|out| show_calendar(&tracker, None, None, out));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "February 2024");
        assert_eq!(lines[1], " Mo   Tu   We   Th   Fr   Sa   Su");
        // Thursday the 1st after three padding cells
        assert!(lines[2].starts_with("                 1"));
        assert!(output.contains(" 5~ [ 6~]"));
        assert!(output.contains(" 20* "));
    }

    #[test]
    fn test_calendar_toggle_writes_then_renders() {
        let (tracker, _dir) = tracker(date(2, 6));

        let output = rendered(|out| show_calendar(&tracker, Some((2024, 2)), Some("14"), out));

        assert!(output.starts_with("2024-02-14 marked as period days."));
        assert!(output.contains(" 14* "));
        assert_eq!(tracker.store.get(date(2, 14)).unwrap(), Some(period(2, 14)));
    }

    #[test]
    fn test_calendar_invalid_toggle_leaves_store_alone() {
        let (tracker, _dir) = tracker(date(2, 6));

        let result = show_calendar(&tracker, None, Some("31"), &mut Vec::new());

        assert!(matches!(result, Err(AppError::Input(_))));
        assert!(tracker.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_periods_report() {
        let (tracker, _dir) = tracker(date(3, 1));
        for (m, d) in [(1, 1), (1, 2), (1, 3), (1, 29), (1, 30)] {
            tracker.store.upsert(period(m, d)).unwrap();
        }

        let output = rendered(|out| show_periods(&tracker, out));

        assert!(output.contains("- 2024-01-01 to 2024-01-03 (3 day(s))"));
        assert!(output.contains("- 2024-01-29 to 2024-01-30 (2 day(s))"));
        assert!(output.contains("Cycle lengths: 28 days"));
        assert!(output.contains("Average cycle length: 28.0 days"));
        assert!(output.contains("Predicted next period: 2024-02-26"));
    }

    #[test]
    fn test_periods_none_recorded() {
        let (tracker, _dir) = tracker(date(3, 1));
        let output = rendered(|out| show_periods(&tracker, out));
        assert!(output.contains("No period days recorded."));
    }
}
