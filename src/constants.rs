//! Constants used throughout the application.
//!
//! This module contains all constants used in the habitlog application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "habitlog";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str =
    "A personal health-habit log for sleep, mood, water and cycle tracking";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Number of entries shown by `recent` when no count is given.
pub const DEFAULT_RECENT_COUNT: usize = 5;
/// Window used by the weekly summary and dashboard quick stats.
pub const WEEKLY_WINDOW: usize = 7;

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_HABITLOG_DIR: &str = "HABITLOG_DIR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for tracker data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".habitlog";

// File System Parameters
/// Entry store file name.
pub const DATA_FILE_NAME: &str = "tracker_data.csv";
/// Goal configuration file name.
pub const GOALS_FILE_NAME: &str = "config.json";
/// Export artifact file name.
pub const EXPORT_FILE_NAME: &str = "export_weekly_summary.csv";
/// Profile file name.
pub const PROFILE_FILE_NAME: &str = "profile.json";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Store Schema
/// Column header of the entry store, in file order.
pub const STORE_HEADER: [&str; 6] = ["date", "sleep", "mood", "water_intake", "period", "notes"];
/// Column header of the export artifact, in file order.
pub const EXPORT_HEADER: [&str; 5] = [
    "avg_sleep",
    "avg_water",
    "happy_count",
    "neutral_count",
    "low_count",
];
/// Literal written for a period day.
pub const PERIOD_YES: &str = "yes";
/// Literal written for a non-period day.
pub const PERIOD_NO: &str = "no";

// Goals
/// Default nightly sleep goal in hours.
pub const DEFAULT_SLEEP_GOAL_HOURS: f64 = 7.0;
/// Default daily water goal in litres.
pub const DEFAULT_WATER_GOAL_LITRES: f64 = 2.0;

// Profile
/// Default average cycle length in days.
pub const DEFAULT_CYCLE_LENGTH_DAYS: u32 = 28;
/// Shortest accepted average cycle length.
pub const MIN_CYCLE_LENGTH_DAYS: u32 = 18;
/// Longest accepted average cycle length.
pub const MAX_CYCLE_LENGTH_DAYS: u32 = 45;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Month selector format for the calendar (YYYY-MM).
pub const MONTH_FORMAT: &str = "%Y-%m";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "habitlog";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
