//! The daily entry record and its field encodings.

use crate::constants::{self, PERIOD_NO, PERIOD_YES};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How the day felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mood {
    Happy,
    Neutral,
    Low,
}

impl Mood {
    /// All moods in display order.
    pub const ALL: [Mood; 3] = [Mood::Happy, Mood::Neutral, Mood::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Low => "Low",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    /// Parses a mood case-insensitively.
    ///
    /// ```
    /// use habitlog::Mood;
    ///
    /// assert_eq!("happy".parse::<Mood>(), Ok(Mood::Happy));
    /// assert_eq!(" LOW ".parse::<Mood>(), Ok(Mood::Low));
    /// assert!("ecstatic".parse::<Mood>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown mood '{}', expected Happy, Neutral or Low", trimmed))
    }
}

/// One day in the log. The date is the entry's identity within the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub date: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub mood: Option<Mood>,
    pub water_litres: Option<f64>,
    pub period: bool,
    pub notes: Option<String>,
}

impl Entry {
    /// An entry with every optional field empty and no period.
    pub fn new(date: NaiveDate) -> Self {
        Entry {
            date,
            sleep_hours: None,
            mood: None,
            water_litres: None,
            period: false,
            notes: None,
        }
    }

    /// Decodes one store row. Returns `None` only when the date is unusable;
    /// every other malformed field degrades to "absent".
    pub(crate) fn from_fields(fields: &[&str]) -> Option<Self> {
        let field = |index: usize| fields.get(index).map(|f| f.trim()).unwrap_or("");

        let date = NaiveDate::parse_from_str(field(0), constants::DATE_FORMAT_ISO).ok()?;

        let mood = match field(2) {
            "" => None,
            raw => match raw.parse::<Mood>() {
                Ok(mood) => Some(mood),
                Err(e) => {
                    debug!("Ignoring mood on {}: {}", date, e);
                    None
                }
            },
        };

        let notes = fields
            .get(5)
            .filter(|notes| !notes.is_empty())
            .map(|notes| notes.to_string());

        Some(Entry {
            date,
            sleep_hours: parse_amount(field(1)),
            mood,
            water_litres: parse_amount(field(3)),
            period: field(4).eq_ignore_ascii_case(PERIOD_YES),
            notes,
        })
    }

    /// Encodes the entry in store column order.
    pub(crate) fn to_fields(&self) -> [String; 6] {
        let amount = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        [
            self.date.format(constants::DATE_FORMAT_ISO).to_string(),
            amount(self.sleep_hours),
            self.mood.map(|m| m.to_string()).unwrap_or_default(),
            amount(self.water_litres),
            if self.period { PERIOD_YES } else { PERIOD_NO }.to_string(),
            self.notes.clone().unwrap_or_default(),
        ]
    }
}

/// Reads a non-negative decimal; anything else is treated as absent.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            debug!("Ignoring malformed amount '{}'", raw);
            None
        }
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
///
/// ```
/// use habitlog::store::parse_date;
///
/// assert_eq!(parse_date("2024-01-15"), parse_date("20240115"));
/// assert!(parse_date("15/01/2024").is_err());
/// ```
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    let date_str = date_str.trim();
    NaiveDate::parse_from_str(date_str, constants::DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, constants::DATE_FORMAT_COMPACT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_fields_full_row() {
        let entry =
            Entry::from_fields(&["2024-01-15", "7.5", "Happy", "2", "YES", "slept well"]).unwrap();

        assert_eq!(entry.date, date(2024, 1, 15));
        assert_eq!(entry.sleep_hours, Some(7.5));
        assert_eq!(entry.mood, Some(Mood::Happy));
        assert_eq!(entry.water_litres, Some(2.0));
        assert!(entry.period);
        assert_eq!(entry.notes.as_deref(), Some("slept well"));
    }

    #[test]
    fn test_from_fields_short_row_defaults() {
        let entry = Entry::from_fields(&["2024-01-15", "", "", ""]).unwrap();

        assert_eq!(entry, Entry::new(date(2024, 1, 15)));
    }

    #[test]
    fn test_from_fields_malformed_values_are_absent() {
        let entry =
            Entry::from_fields(&["2024-01-15", "lots", "grumpy", "-1", "maybe", ""]).unwrap();

        assert_eq!(entry.sleep_hours, None);
        assert_eq!(entry.mood, None);
        assert_eq!(entry.water_litres, None);
        assert!(!entry.period);
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_from_fields_bad_date_is_rejected() {
        assert!(Entry::from_fields(&["yesterday", "7", "Happy", "2", "no", ""]).is_none());
        assert!(Entry::from_fields(&[]).is_none());
    }

    #[test]
    fn test_to_fields_normalizes_period_and_empties() {
        let mut entry = Entry::new(date(2024, 2, 29));
        entry.period = true;
        entry.sleep_hours = Some(6.5);

        let fields = entry.to_fields();
        assert_eq!(fields[0], "2024-02-29");
        assert_eq!(fields[1], "6.5");
        assert_eq!(fields[2], "");
        assert_eq!(fields[3], "");
        assert_eq!(fields[4], "yes");
        assert_eq!(fields[5], "");
    }
}
