//! Aggregates over an arbitrary subset of entries.
//!
//! All functions here are pure: they take entries (and nothing else) and never
//! touch the store. Numeric fields that are absent are left out of averages
//! instead of counting as zero.

use crate::store::{Entry, Mood};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Selects `sleep_hours`.
pub fn sleep_hours(entry: &Entry) -> Option<f64> {
    entry.sleep_hours
}

/// Selects `water_litres`.
pub fn water_litres(entry: &Entry) -> Option<f64> {
    entry.water_litres
}

/// Arithmetic mean of the selected field over the entries that have it.
///
/// Returns `None` when no entry has the field, never a misleading zero.
///
/// ```
/// use habitlog::aggregate::{average, sleep_hours};
/// use habitlog::store::Entry;
/// use chrono::NaiveDate;
///
/// let day = |d, sleep| {
///     let mut entry = Entry::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap());
///     entry.sleep_hours = sleep;
///     entry
/// };
///
/// assert_eq!(average(&[day(1, Some(6.0)), day(2, Some(8.0)), day(3, None)], sleep_hours), Some(7.0));
/// assert_eq!(average(&[day(1, None)], sleep_hours), None);
/// ```
pub fn average(entries: &[Entry], selector: impl Fn(&Entry) -> Option<f64>) -> Option<f64> {
    let (sum, count) = entries
        .iter()
        .filter_map(selector)
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Tally of moods; entries without a mood are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodCounts {
    pub happy: usize,
    pub neutral: usize,
    pub low: usize,
}

impl MoodCounts {
    pub fn get(&self, mood: Mood) -> usize {
        match mood {
            Mood::Happy => self.happy,
            Mood::Neutral => self.neutral,
            Mood::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.happy + self.neutral + self.low
    }
}

pub fn mood_distribution(entries: &[Entry]) -> MoodCounts {
    entries
        .iter()
        .filter_map(|entry| entry.mood)
        .fold(MoodCounts::default(), |mut counts, mood| {
            match mood {
                Mood::Happy => counts.happy += 1,
                Mood::Neutral => counts.neutral += 1,
                Mood::Low => counts.low += 1,
            }
            counts
        })
}

/// Dates flagged as period days.
pub fn period_dates(entries: &[Entry]) -> BTreeSet<NaiveDate> {
    entries
        .iter()
        .filter(|entry| entry.period)
        .map(|entry| entry.date)
        .collect()
}

/// The `n` most recent entries by date, oldest first.
///
/// Returns every entry when there are fewer than `n`.
pub fn last_n(entries: &[Entry], n: usize) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| entry.date);
    let skip = sorted.len().saturating_sub(n);
    sorted.split_off(skip)
}

/// One averaged snapshot of a set of entries.
///
/// Used by the weekly summary, the dashboard and the export artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub entry_count: usize,
    pub avg_sleep: Option<f64>,
    pub avg_water: Option<f64>,
    pub moods: MoodCounts,
    pub period_days: usize,
}

pub fn summarize(entries: &[Entry]) -> Summary {
    Summary {
        entry_count: entries.len(),
        avg_sleep: average(entries, sleep_hours),
        avg_water: average(entries, water_litres),
        moods: mood_distribution(entries),
        period_days: entries.iter().filter(|entry| entry.period).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32) -> Entry {
        Entry::new(NaiveDate::from_ymd_opt(2024, 5, day).unwrap())
    }

    fn with_sleep(day: u32, sleep: f64) -> Entry {
        Entry {
            sleep_hours: Some(sleep),
            ..entry(day)
        }
    }

    #[test]
    fn test_average_of_present_values() {
        let entries = vec![with_sleep(1, 6.0), with_sleep(2, 8.0)];
        assert_eq!(average(&entries, sleep_hours), Some(7.0));
    }

    #[test]
    fn test_average_absent_not_zero() {
        let entries = vec![with_sleep(1, 6.0), entry(2)];
        assert_eq!(average(&entries, water_litres), None);
        assert_eq!(average(&[], sleep_hours), None);
    }

    #[test]
    fn test_average_accepts_closures() {
        let entries = vec![with_sleep(1, 5.0), with_sleep(2, 9.0)];
        let doubled = average(&entries, |e: &Entry| e.sleep_hours.map(|h| h * 2.0));
        assert_eq!(doubled, Some(14.0));
    }

    #[test]
    fn test_mood_distribution_skips_missing() {
        let entries = vec![
            Entry {
                mood: Some(Mood::Happy),
                ..entry(1)
            },
            Entry {
                mood: Some(Mood::Happy),
                ..entry(2)
            },
            Entry {
                mood: Some(Mood::Low),
                ..entry(3)
            },
            entry(4),
        ];

        let counts = mood_distribution(&entries);
        assert_eq!(
            counts,
            MoodCounts {
                happy: 2,
                neutral: 0,
                low: 1
            }
        );
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(Mood::Happy), 2);
    }

    #[test]
    fn test_period_dates() {
        let entries = vec![
            Entry {
                period: true,
                ..entry(3)
            },
            entry(4),
            Entry {
                period: true,
                ..entry(1)
            },
        ];

        let dates: Vec<String> = period_dates(&entries).iter().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-05-01", "2024-05-03"]);
    }

    #[test]
    fn test_last_n_by_date_not_position() {
        let entries = vec![entry(9), entry(1), entry(5), entry(7)];

        let last: Vec<u32> = last_n(&entries, 2)
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(last, vec![7, 9]);

        assert_eq!(last_n(&entries, 10).len(), 4);
        assert!(last_n(&entries, 0).is_empty());
    }

    #[test]
    fn test_summarize() {
        let entries = vec![
            Entry {
                water_litres: Some(2.0),
                period: true,
                mood: Some(Mood::Neutral),
                ..with_sleep(1, 6.0)
            },
            Entry {
                water_litres: Some(1.0),
                ..with_sleep(2, 8.0)
            },
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.avg_sleep, Some(7.0));
        assert_eq!(summary.avg_water, Some(1.5));
        assert_eq!(summary.moods.neutral, 1);
        assert_eq!(summary.period_days, 1);
    }
}
