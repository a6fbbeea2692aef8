//! Append-only export of averaged snapshots.
//!
//! Each export appends one `avg_sleep,avg_water,happy_count,neutral_count,low_count`
//! row. The header is written only when the file is created.

use crate::aggregate::Summary;
use crate::constants::EXPORT_HEADER;
use crate::errors::{AppResult, StoreError};
use csv::WriterBuilder;
use std::fs::OpenOptions;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::info;

/// Appends `summary` to the export file at `path`.
pub fn append_snapshot(path: &Path, summary: &Summary) -> AppResult<()> {
    let write_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let is_new = !path.exists();
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
    let file = options.open(path).map_err(write_error)?;

    let mut writer = WriterBuilder::new().from_writer(file);
    if is_new {
        writer.write_record(EXPORT_HEADER).map_err(StoreError::from)?;
    }

    let average = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    writer
        .write_record([
            average(summary.avg_sleep),
            average(summary.avg_water),
            summary.moods.happy.to_string(),
            summary.moods.neutral.to_string(),
            summary.moods.low.to_string(),
        ])
        .map_err(StoreError::from)?;
    writer.flush().map_err(write_error)?;

    info!("Appended export snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MoodCounts;
    use std::fs;
    use tempfile::tempdir;

    fn summary(avg_sleep: Option<f64>) -> Summary {
        Summary {
            entry_count: 3,
            avg_sleep,
            avg_water: Some(1.5),
            moods: MoodCounts {
                happy: 2,
                neutral: 1,
                low: 0,
            },
            period_days: 0,
        }
    }

    #[test]
    fn test_header_written_once_rows_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export_weekly_summary.csv");

        append_snapshot(&path, &summary(Some(7.25))).unwrap();
        append_snapshot(&path, &summary(None)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "avg_sleep,avg_water,happy_count,neutral_count,low_count",
                "7.25,1.5,2,1,0",
                ",1.5,2,1,0",
            ]
        );
    }
}
