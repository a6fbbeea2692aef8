//! Month grids with period overlays, and the period toggle.

use crate::aggregate::period_dates;
use crate::errors::{AppError, AppResult};
use crate::store::{Entry, EntryStore};
use crate::streak::{period_runs, PeriodRun};
use chrono::{Datelike, NaiveDate};
use tracing::info;

/// One real day of the month and its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_period_day: bool,
    /// The day sits inside a period run of two or more days.
    pub in_streak: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Placeholder for a weekday outside the month.
    Padding,
    Day(CalendarDay),
}

/// A month laid out Monday-first, one row per week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[DayCell; 7]>,
}

impl MonthGrid {
    /// e.g. "January 2024".
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// Every real day in the grid, in order.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().filter_map(|cell| match cell {
            DayCell::Day(day) => Some(day),
            DayCell::Padding => None,
        })
    }
}

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Input(format!("{}-{:02} is not a valid month", year, month)))
}

/// Number of days in the month starting at `first`.
fn month_length(first: NaiveDate) -> AppResult<i64> {
    let next = if first.month() == 12 {
        first_of_month(first.year() + 1, 1)?
    } else {
        first_of_month(first.year(), first.month() + 1)?
    };
    Ok((next - first).num_days())
}

/// Lays out `year`-`month` and marks today, period days and multi-day runs.
///
/// # Errors
///
/// Returns `AppError::Input` if the month does not exist.
///
/// # Examples
///
/// ```
/// use habitlog::calendar::{build_month_grid, DayCell};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let grid = build_month_grid(2024, 1, today, &[]).unwrap();
///
/// // January 2024 starts on a Monday and spans five weeks
/// assert_eq!(grid.weeks.len(), 5);
/// assert!(matches!(grid.weeks[0][0], DayCell::Day(_)));
/// assert!(grid.days().any(|day| day.is_today));
/// ```
pub fn build_month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    entries: &[Entry],
) -> AppResult<MonthGrid> {
    let first = first_of_month(year, month)?;
    let length = month_length(first)?;

    let period_days = period_dates(entries);
    let streaks: Vec<PeriodRun> = period_runs(&period_days)
        .into_iter()
        .filter(|run| run.days() >= 2)
        .collect();

    let lead = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<DayCell> = vec![DayCell::Padding; lead];
    cells.extend(first.iter_days().take(length as usize).map(|date| {
        DayCell::Day(CalendarDay {
            date,
            is_today: date == today,
            is_period_day: period_days.contains(&date),
            in_streak: streaks.iter().any(|run| run.contains(date)),
        })
    }));
    let trailing = (7 - cells.len() % 7) % 7;
    cells.extend(std::iter::repeat(DayCell::Padding).take(trailing));

    let weeks = cells
        .chunks(7)
        .map(|week| {
            let mut row = [DayCell::Padding; 7];
            row.copy_from_slice(week);
            row
        })
        .collect();

    Ok(MonthGrid { year, month, weeks })
}

/// Flips the period flag for `date` and saves the result.
///
/// An existing entry keeps every other field; a missing one is created with
/// only `period = yes`. Toggling back never deletes the record.
pub fn toggle_period<S>(store: &S, date: NaiveDate) -> AppResult<Entry>
where
    S: EntryStore + ?Sized,
{
    let entry = match store.get(date)? {
        Some(existing) => Entry {
            period: !existing.period,
            ..existing
        },
        None => Entry {
            period: true,
            ..Entry::new(date)
        },
    };

    store.upsert(entry.clone())?;
    info!(%date, period = entry.period, "Toggled period day");
    Ok(entry)
}
