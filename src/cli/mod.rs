use crate::constants;
use crate::ops::entries::EntryField;
use crate::store::{parse_date, Mood};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// A personal health-habit log for sleep, mood, water and cycle tracking
#[derive(Parser, Debug)]
#[clap(name = "habitlog", about = "A personal health-habit log for sleep, mood, water and cycle tracking")]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format: text or json
    #[clap(long, global = true, default_value = constants::LOG_FORMAT_TEXT, value_parser = [constants::LOG_FORMAT_TEXT, constants::LOG_FORMAT_JSON])]
    pub log_format: String,

    #[clap(subcommand)]
    pub command: Command,
}

/// Field values shared by `add` and `edit`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EntryFields {
    /// Hours slept
    #[clap(short = 's', long, value_parser = parse_amount)]
    pub sleep: Option<f64>,

    /// Mood: Happy, Neutral or Low
    #[clap(short = 'm', long)]
    pub mood: Option<Mood>,

    /// Litres of water
    #[clap(short = 'w', long, value_parser = parse_amount)]
    pub water: Option<f64>,

    /// Period today: yes or no
    #[clap(short = 'p', long, value_parser = parse_yes_no)]
    pub period: Option<bool>,

    /// Free-text notes
    #[clap(short = 'n', long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save the entry for a day (today unless --date is given), replacing any existing one
    Add {
        /// Date of the entry (YYYY-MM-DD or YYYYMMDD)
        #[clap(short = 'd', long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        #[clap(flatten)]
        fields: EntryFields,
    },

    /// Show the most recent entries
    Recent {
        /// How many entries to show
        #[clap(short = 'n', long, default_value_t = constants::DEFAULT_RECENT_COUNT)]
        count: usize,
    },

    /// Show every entry
    List,

    /// Averages, moods and period days over the last seven entries, plus goal streaks
    Summary,

    /// Profile card and quick stats
    Dashboard,

    /// Change fields of an existing entry
    Edit {
        /// Date of the entry to edit
        #[clap(short = 'd', long, value_parser = parse_date_arg)]
        date: NaiveDate,

        #[clap(flatten)]
        fields: EntryFields,

        /// Empty a field (repeatable)
        #[clap(long, value_enum)]
        clear: Vec<EntryField>,
    },

    /// Delete the entry for a date
    Delete {
        /// Date of the entry to delete
        #[clap(short = 'd', long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },

    /// Show the period calendar, optionally toggling one day
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[clap(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,

        /// Day of the shown month (1-31) or a full date whose period flag flips
        #[clap(short = 't', long)]
        toggle: Option<String>,
    },

    /// List period days, period runs and cycle statistics
    Periods,

    /// Sleep and water goal streaks with a per-day goal chart
    Streaks,

    /// Show or update sleep and water goals
    Goals {
        /// New sleep goal in hours
        #[clap(long, value_parser = parse_amount)]
        sleep: Option<f64>,

        /// New water goal in litres
        #[clap(long, value_parser = parse_amount)]
        water: Option<f64>,
    },

    /// Append an averaged snapshot of all entries to the export file
    Export,

    /// Delete every entry (goals and profile are kept)
    Reset {
        /// Skip the confirmation prompt
        #[clap(short = 'y', long)]
        yes: bool,
    },

    /// Show or update the profile
    Profile {
        /// Full name
        #[clap(long)]
        name: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[clap(long, value_parser = parse_date_arg)]
        dob: Option<NaiveDate>,

        /// Average cycle length in days (18-45)
        #[clap(long)]
        cycle_length: Option<u32>,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| format!("Invalid date format '{}': {}", raw, e))
}

fn parse_amount(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err(format!("'{}' must be a non-negative number", raw)),
        Err(_) => Err(format!("'{}' is not a number", raw)),
    }
}

fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        constants::PERIOD_YES | "y" => Ok(true),
        constants::PERIOD_NO | "n" => Ok(false),
        _ => Err(format!("expected 'yes' or 'no', got '{}'", raw)),
    }
}

fn parse_month(raw: &str) -> Result<(i32, u32), String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month '{}', expected YYYY-MM", raw))?;
    Ok((chrono::Datelike::year(&first), chrono::Datelike::month(&first)))
}
