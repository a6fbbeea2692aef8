/*!
# Habitlog

Habitlog is a personal health-habit log. Each day gets one entry with sleep hours,
mood, water intake, a period flag and free-text notes. From those entries it derives
weekly summaries, goal streaks, period runs and a month calendar.

## Core Features

- One entry per date, kept in a single CSV file that is rewritten atomically
- Weekly averages and mood distribution
- Current and longest streaks for configurable sleep and water goals
- Period runs, cycle lengths and a Monday-first month calendar with a period toggle
- Append-only export of averaged snapshots

## Architecture

- `store`: the entry record and the CSV-backed `EntryStore`
- `aggregate`: averages, mood counts and the last-N window
- `streak`: goal streaks, period runs and cycle statistics
- `calendar`: month grids and the period toggle
- `export`: the append-only snapshot file
- `config`: data directory, goals and profile
- `ops`: user-facing actions that render to any `Write`
- `cli`: command-line parsing using clap
- `errors`: error handling infrastructure

## Usage Example

```rust,no_run
use habitlog::store::{CsvStore, EntryStore};
use habitlog::streak::goal_streaks;
use habitlog::{Config, GoalConfig};

fn main() -> habitlog::AppResult<()> {
    let config = Config::load()?;
    habitlog::config::ensure_data_dir_exists(&config.data_dir)?;

    let goals = GoalConfig::load_or_init(&config.goals_file())?;
    let entries = CsvStore::new(config.data_file()).load()?;

    let streaks = goal_streaks(&entries, &goals);
    println!("Sleep streak: {} (longest {})", streaks.sleep.current, streaks.sleep.longest);
    Ok(())
}
```
*/

pub mod aggregate;
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Data directory, goals and profile settings
pub mod config;
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
pub mod export;
pub mod ops;
pub mod store;
pub mod streak;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::{Config, GoalConfig, Profile};
pub use errors::{AppError, AppResult};
pub use store::{Entry, Mood};
