//! CSV-backed entry store.
//!
//! File layout: a fixed header `date,sleep,mood,water_intake,period,notes`
//! followed by one quoted-as-needed record per entry.

use super::{canonicalize, Entry, EntryStore};
use crate::constants::STORE_HEADER;
use crate::errors::{AppResult, StoreError};
use csv::{ReaderBuilder, WriterBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Entry store kept in a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store, creating it with just the header when it is missing.
    ///
    /// An existing file that cannot be read yields an empty list and a warning,
    /// or `StoreError::Read` when `strict` is set.
    fn read(&self, strict: bool) -> AppResult<Vec<Entry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Creating empty entry store at {}", self.path.display());
                self.write_snapshot(&[])?;
                return Ok(Vec::new());
            }
            Err(e) => return self.unreadable(e, strict),
        };

        match parse_records(file) {
            Ok(entries) => {
                debug!("Loaded {} entries from {}", entries.len(), self.path.display());
                Ok(entries)
            }
            Err(e) => self.unreadable(e, strict),
        }
    }

    fn unreadable(&self, source: io::Error, strict: bool) -> AppResult<Vec<Entry>> {
        if strict {
            return Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }
            .into());
        }
        warn!(
            "Entry store {} is unreadable, treating it as empty: {}",
            self.path.display(),
            source
        );
        Ok(Vec::new())
    }

    /// Writes `entries` to a sibling temporary file, then moves it over the store.
    ///
    /// The old file stays in place if anything fails before the final rename.
    fn write_snapshot(&self, entries: &[Entry]) -> AppResult<()> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let snapshot = NamedTempFile::new_in(dir).map_err(write_error)?;
        {
            let mut writer = WriterBuilder::new().from_writer(snapshot.as_file());
            writer.write_record(STORE_HEADER).map_err(StoreError::from)?;
            for entry in entries {
                writer.write_record(entry.to_fields()).map_err(StoreError::from)?;
            }
            writer.flush().map_err(write_error)?;
        }
        snapshot.as_file().sync_all().map_err(write_error)?;

        snapshot
            .persist(&self.path)
            .map_err(|e| StoreError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        debug!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// Decodes store rows leniently.
///
/// Fields are decoded lossily, so bytes that are not UTF-8 only spoil the field
/// holding them. Rows with an unusable date are skipped. Only an I/O failure of
/// the underlying reader is an error.
fn parse_records<R: Read>(source: R) -> io::Result<Vec<Entry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut entries = Vec::new();
    for (line, record) in reader.byte_records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => match e.into_kind() {
                csv::ErrorKind::Io(err) => return Err(err),
                other => {
                    warn!("Skipping unreadable store record {}: {:?}", line + 1, other);
                    continue;
                }
            },
        };

        let decoded: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
        let fields: Vec<&str> = decoded.iter().map(|field| field.as_ref()).collect();
        if line == 0 && is_header(&fields) {
            continue;
        }
        match Entry::from_fields(&fields) {
            Some(entry) => entries.push(entry),
            None => warn!("Skipping store record {} with an invalid date", line + 1),
        }
    }

    Ok(canonicalize(entries))
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .first()
        .map(|first| first.trim().eq_ignore_ascii_case(STORE_HEADER[0]))
        .unwrap_or(false)
}

impl EntryStore for CsvStore {
    fn load(&self) -> AppResult<Vec<Entry>> {
        self.read(false)
    }

    fn load_for_update(&self) -> AppResult<Vec<Entry>> {
        self.read(true)
    }

    fn replace_all(&self, entries: &[Entry]) -> AppResult<()> {
        self.write_snapshot(&canonicalize(entries.iter().cloned()))
    }
}
