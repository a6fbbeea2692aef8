/*!
# Habitlog - A Personal Health-Habit Log

Records one entry per day (sleep, mood, water, period, notes) and derives
summaries, goal streaks and a period calendar from them.

## Usage

```text
habitlog [OPTIONS] <COMMAND>

Commands:
  add        Save the entry for a day
  recent     Show the most recent entries
  list       Show every entry
  summary    Weekly averages, moods and goal streaks
  dashboard  Profile card and quick stats
  edit       Change fields of an existing entry
  delete     Delete the entry for a date
  calendar   Show the period calendar, optionally toggling one day
  periods    List period days, runs and cycle statistics
  streaks    Goal streaks with a per-day chart
  goals      Show or update sleep and water goals
  export     Append a snapshot to the export file
  reset      Delete every entry
  profile    Show or update the profile

Options:
  -v, --verbose              Print verbose output
      --log-format <FORMAT>  text or json
```

## Configuration

- `HABITLOG_DIR`: directory for the data files (defaults to "~/.habitlog")
- `RUST_LOG`: log filter, overridden to `debug` by `--verbose`
*/

use chrono::Local;
use habitlog::cli::{CliArgs, Command};
use habitlog::config::Config;
use habitlog::constants;
use habitlog::errors::AppResult;
use habitlog::ops::settings::ProfileUpdate;
use habitlog::ops::{self, calendar, entries, settings, summary, Tracker};
use std::io::{self, Write};
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so command output stays clean.
fn init_tracing(verbose: bool, log_format: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if log_format == constants::LOG_FORMAT_JSON {
        builder.json().with_current_span(true).with_span_list(false).init();
    } else {
        builder.with_target(false).init();
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let mut tracker = Tracker::open(config, Local::now().date_naive())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Add { date, fields } => {
            entries::add_entry(&tracker, date, fields, &mut out)?;
        }
        Command::Recent { count } => entries::show_recent(&tracker, count, &mut out)?,
        Command::List => entries::show_all(&tracker, &mut out)?,
        Command::Summary => summary::weekly_summary(&tracker, &mut out)?,
        Command::Dashboard => summary::dashboard(&tracker, &mut out)?,
        Command::Edit { date, fields, clear } => {
            entries::edit_entry(&tracker, date, fields, &clear, &mut out)?;
        }
        Command::Delete { date } => {
            entries::delete_entry(&tracker, date, &mut out)?;
        }
        Command::Calendar { month, toggle } => {
            calendar::show_calendar(&tracker, month, toggle.as_deref(), &mut out)?
        }
        Command::Periods => calendar::show_periods(&tracker, &mut out)?,
        Command::Streaks => summary::streak_chart(&tracker, &mut out)?,
        Command::Goals { sleep, water } => {
            settings::goals(&mut tracker, sleep, water, &mut out)?;
        }
        Command::Export => {
            summary::export(&tracker, &mut out)?;
        }
        Command::Reset { yes } => {
            let confirmed = yes || {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                ops::prompt_yes_no("Are you sure you want to delete all entries?", &mut input, &mut out)?
            };
            if confirmed {
                ops::reset(&tracker, &mut out)?;
            } else {
                writeln!(out, "Reset cancelled.")?;
            }
        }
        Command::Profile {
            name,
            dob,
            cycle_length,
        } => {
            let update = ProfileUpdate {
                name,
                dob,
                cycle_length,
            };
            settings::profile(&tracker, update, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!(
        constants::TRACING_ROOT_SPAN_NAME,
        service_name = constants::TRACING_SERVICE_NAME,
        correlation_id = %correlation_id,
    );
    let _guard = span.enter();
    info!("Starting {}", constants::APP_NAME);

    if let Err(e) = run(args) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
