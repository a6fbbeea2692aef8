//! Run-length computations over the log.
//!
//! Two separate algorithms live here:
//!
//! - [`run_lengths`] counts consecutive `true` values of a predicate over a
//!   date-ordered sequence of entries. Gaps between dates do not matter; only
//!   the order of the recorded entries does. Goal streaks use this.
//! - [`period_runs`] partitions a set of dates into maximal runs of
//!   calendar-consecutive days. Period grouping and the calendar overlay use this.

use crate::config::GoalConfig;
use crate::store::Entry;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Current and longest run of a predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streak {
    /// Length of the run ending at the last element of the sequence.
    pub current: u32,
    /// Longest run anywhere in the sequence.
    pub longest: u32,
}

/// Walks `values` with a counter that grows on `true` and resets on `false`.
///
/// `current` is the counter's final value, so it reflects the last recorded
/// element rather than today's date.
///
/// ```
/// use habitlog::streak::run_lengths;
///
/// let streak = run_lengths([true, true, false, true, true, true]);
/// assert_eq!((streak.current, streak.longest), (3, 3));
///
/// let streak = run_lengths([true, true, false]);
/// assert_eq!((streak.current, streak.longest), (0, 2));
/// ```
pub fn run_lengths<I>(values: I) -> Streak
where
    I: IntoIterator<Item = bool>,
{
    values
        .into_iter()
        .fold(Streak::default(), |streak, hit| {
            if hit {
                let current = streak.current + 1;
                Streak {
                    current,
                    longest: streak.longest.max(current),
                }
            } else {
                Streak {
                    current: 0,
                    ..streak
                }
            }
        })
}

/// Runs `predicate` over `entries` in date order.
pub fn streak_by<P>(entries: &[Entry], predicate: P) -> Streak
where
    P: Fn(&Entry) -> bool,
{
    let mut ordered: Vec<&Entry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.date);
    run_lengths(ordered.into_iter().map(predicate))
}

/// A missing value never meets a goal.
fn meets(value: Option<f64>, goal: f64) -> bool {
    value.map(|v| v >= goal).unwrap_or(false)
}

/// Whether the entry reached the sleep goal.
pub fn meets_sleep_goal(entry: &Entry, goals: &GoalConfig) -> bool {
    meets(entry.sleep_hours, goals.sleep_goal_hours)
}

/// Whether the entry reached the water goal.
pub fn meets_water_goal(entry: &Entry, goals: &GoalConfig) -> bool {
    meets(entry.water_litres, goals.water_goal_litres)
}

/// Sleep and water streaks for one goal configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalStreaks {
    pub sleep: Streak,
    pub water: Streak,
}

pub fn goal_streaks(entries: &[Entry], goals: &GoalConfig) -> GoalStreaks {
    GoalStreaks {
        sleep: streak_by(entries, |entry| meets_sleep_goal(entry, goals)),
        water: streak_by(entries, |entry| meets_water_goal(entry, goals)),
    }
}

/// How many of the two goals a single day reached: 0, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyGoalStatus {
    pub date: NaiveDate,
    pub goals_met: u8,
}

/// Per-day goal status in date order, the data behind a goal chart.
pub fn daily_goal_status(entries: &[Entry], goals: &GoalConfig) -> Vec<DailyGoalStatus> {
    let mut statuses: Vec<DailyGoalStatus> = entries
        .iter()
        .map(|entry| DailyGoalStatus {
            date: entry.date,
            goals_met: u8::from(meets_sleep_goal(entry, goals))
                + u8::from(meets_water_goal(entry, goals)),
        })
        .collect();
    statuses.sort_by_key(|status| status.date);
    statuses
}

/// A maximal run of calendar-consecutive period days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRun {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodRun {
    /// Number of days in the run, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Partitions `dates` into runs where each day follows the previous by exactly one.
///
/// ```
/// use habitlog::streak::period_runs;
/// use chrono::NaiveDate;
/// use std::collections::BTreeSet;
///
/// let date = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let dates: BTreeSet<_> = [date(1), date(2), date(5)].into_iter().collect();
///
/// let runs = period_runs(&dates);
/// assert_eq!(runs.len(), 2);
/// assert_eq!((runs[0].start, runs[0].end), (date(1), date(2)));
/// assert_eq!((runs[1].start, runs[1].end), (date(5), date(5)));
/// ```
pub fn period_runs(dates: &BTreeSet<NaiveDate>) -> Vec<PeriodRun> {
    let mut runs: Vec<PeriodRun> = Vec::new();
    for &date in dates {
        match runs.last_mut() {
            Some(run) if run.end.succ_opt() == Some(date) => run.end = date,
            _ => runs.push(PeriodRun {
                start: date,
                end: date,
            }),
        }
    }
    runs
}

/// Cycle figures derived from period runs.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub runs: Vec<PeriodRun>,
    /// Days between the starts of consecutive runs.
    pub cycle_lengths: Vec<i64>,
    pub average_cycle_length: Option<f64>,
    /// Last run start plus the average cycle length, or plus `fallback_cycle_length`
    /// when fewer than two runs are recorded.
    pub predicted_next_start: Option<NaiveDate>,
}

pub fn cycle_report(dates: &BTreeSet<NaiveDate>, fallback_cycle_length: Option<u32>) -> CycleReport {
    let runs = period_runs(dates);
    let cycle_lengths: Vec<i64> = runs
        .windows(2)
        .map(|pair| (pair[1].start - pair[0].start).num_days())
        .collect();

    let average_cycle_length = if cycle_lengths.is_empty() {
        None
    } else {
        Some(cycle_lengths.iter().sum::<i64>() as f64 / cycle_lengths.len() as f64)
    };

    let step = average_cycle_length
        .map(|avg| avg.round() as i64)
        .or_else(|| fallback_cycle_length.map(i64::from));

    let predicted_next_start = match (runs.last(), step) {
        (Some(last), Some(days)) => last.start.checked_add_signed(chrono::Duration::days(days)),
        _ => None,
    };

    CycleReport {
        runs,
        cycle_lengths,
        average_cycle_length,
        predicted_next_start,
    }
}
