//! The durable collection of daily entries.
//!
//! The store is conceptually a map from date to [`Entry`]. Every mutation loads
//! the full collection, changes it in memory and rewrites the whole backing file
//! before returning; there is no append path and no partial update.
//!
//! # Example
//!
//! ```no_run
//! use habitlog::store::{CsvStore, Entry, EntryStore};
//! use chrono::NaiveDate;
//!
//! let store = CsvStore::new("/tmp/habitlog/tracker_data.csv");
//! let mut entry = Entry::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//! entry.sleep_hours = Some(7.5);
//! store.upsert(entry)?;
//! assert_eq!(store.load()?.len(), 1);
//! # Ok::<(), habitlog::AppError>(())
//! ```

mod csv_store;
mod entry;

pub use csv_store::CsvStore;
pub use entry::{parse_date, Entry, Mood};

use crate::errors::AppResult;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Storage interface for daily entries.
///
/// Implementors provide `load` and `replace_all`; the keyed operations are
/// expressed on top of those two so every backend shares the same upsert and
/// delete rules.
pub trait EntryStore {
    /// Reads every entry, sorted by date, at most one per date.
    fn load(&self) -> AppResult<Vec<Entry>>;

    /// Rewrites the whole store with `entries`.
    fn replace_all(&self, entries: &[Entry]) -> AppResult<()>;

    /// Reads the entries a mutation starts from.
    ///
    /// `load` may degrade an unreadable backing file to an empty list; this must
    /// fail instead, because the following rewrite would replace the file.
    fn load_for_update(&self) -> AppResult<Vec<Entry>> {
        self.load()
    }

    /// Inserts `entry`, or replaces the stored entry with the same date entirely.
    ///
    /// Fields left empty on `entry` overwrite whatever the old entry held.
    fn upsert(&self, entry: Entry) -> AppResult<()> {
        let mut entries = self.load_for_update()?;
        match entries.iter_mut().find(|existing| existing.date == entry.date) {
            Some(existing) => {
                debug!("Replacing entry for {}", entry.date);
                *existing = entry;
            }
            None => {
                debug!("Adding entry for {}", entry.date);
                entries.push(entry);
            }
        }
        self.replace_all(&entries)
    }

    /// Removes the entry for `date`. Returns whether one was removed.
    fn delete(&self, date: NaiveDate) -> AppResult<bool> {
        let mut entries = self.load_for_update()?;
        let before = entries.len();
        entries.retain(|entry| entry.date != date);
        let removed = entries.len() != before;
        self.replace_all(&entries)?;
        Ok(removed)
    }

    /// Looks up the entry for `date`.
    fn get(&self, date: NaiveDate) -> AppResult<Option<Entry>> {
        Ok(self.load()?.into_iter().find(|entry| entry.date == date))
    }
}

/// Sorts entries by date and keeps only the last entry seen for each date.
pub(crate) fn canonicalize<I>(entries: I) -> Vec<Entry>
where
    I: IntoIterator<Item = Entry>,
{
    entries
        .into_iter()
        .map(|entry| (entry.date, entry))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}
