//! Weekly summary, dashboard, streak chart and export actions.

use super::Tracker;
use crate::aggregate::{last_n, summarize, Summary};
use crate::config::Profile;
use crate::constants::WEEKLY_WINDOW;
use crate::errors::AppResult;
use crate::export::append_snapshot;
use crate::store::{EntryStore, Mood};
use crate::streak::{daily_goal_status, goal_streaks};
use std::io::Write;

fn fmt_average(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.1} {}", value, unit),
        None => "n/a".to_string(),
    }
}

fn write_moods<W: Write>(summary: &Summary, out: &mut W) -> AppResult<()> {
    let counts: Vec<String> = Mood::ALL
        .iter()
        .map(|mood| format!("{}: {}", mood, summary.moods.get(*mood)))
        .collect();
    writeln!(out, "Mood counts: {}", counts.join(", "))?;
    Ok(())
}

/// Averages, mood counts and period days over the last seven entries, then
/// goal streaks over the whole history.
pub fn weekly_summary<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<()> {
    let entries = tracker.store.load()?;
    if entries.is_empty() {
        writeln!(out, "No valid data found.")?;
        return Ok(());
    }

    let week = summarize(&last_n(&entries, WEEKLY_WINDOW));
    writeln!(out, "Weekly summary (last {} entries):", week.entry_count)?;
    writeln!(out, "Average sleep: {}", fmt_average(week.avg_sleep, "hrs"))?;
    writeln!(out, "Average water intake: {}", fmt_average(week.avg_water, "L"))?;
    write_moods(&week, out)?;
    writeln!(out, "Period days this week: {}", week.period_days)?;

    let goals = &tracker.goals;
    let streaks = goal_streaks(&entries, goals);
    writeln!(out)?;
    writeln!(
        out,
        "Sleep streak: {} day(s) with >= {} hrs sleep (longest: {})",
        streaks.sleep.current, goals.sleep_goal_hours, streaks.sleep.longest
    )?;
    writeln!(
        out,
        "Water streak: {} day(s) with >= {} L water (longest: {})",
        streaks.water.current, goals.water_goal_litres, streaks.water.longest
    )?;
    Ok(())
}

/// Profile card over all entries, then quick stats over the last seven.
pub fn dashboard<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<()> {
    let entries = tracker.store.load()?;

    match Profile::load(&tracker.config.profile_file()) {
        Some(profile) => {
            let all = summarize(&entries);
            writeln!(out, "Profile: {}", profile.name)?;
            if let Some(age) = profile.age_on(tracker.today) {
                writeln!(out, "Age: {}", age)?;
            }
            writeln!(out, "Cycle length: {} days", profile.cycle_length)?;
            writeln!(out, "Total entries: {}", all.entry_count)?;
            writeln!(out, "Average sleep: {}", fmt_average(all.avg_sleep, "hrs"))?;
            writeln!(out, "Average water: {}", fmt_average(all.avg_water, "L"))?;
        }
        None => writeln!(out, "No profile yet. Create one with `habitlog profile --name <NAME>`.")?,
    }

    writeln!(out)?;
    writeln!(out, "Quick stats")?;
    if entries.is_empty() {
        writeln!(out, "No entries yet. Add your first entry.")?;
        return Ok(());
    }

    let recent = summarize(&last_n(&entries, WEEKLY_WINDOW));
    writeln!(out, "- Entries (last {}): {}", WEEKLY_WINDOW, recent.entry_count)?;
    if recent.avg_sleep.is_some() {
        writeln!(out, "- Avg sleep (last {}): {}", WEEKLY_WINDOW, fmt_average(recent.avg_sleep, "hrs"))?;
    }
    if recent.avg_water.is_some() {
        writeln!(out, "- Avg water (last {}): {}", WEEKLY_WINDOW, fmt_average(recent.avg_water, "L"))?;
    }
    write_moods(&recent, out)?;
    Ok(())
}

/// Goal streaks plus one chart row per dated entry.
pub fn streak_chart<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<()> {
    let entries = tracker.store.load()?;
    if entries.is_empty() {
        writeln!(out, "No entries to chart.")?;
        return Ok(());
    }

    let goals = &tracker.goals;
    let streaks = goal_streaks(&entries, goals);
    writeln!(
        out,
        "Sleep streak: {} (longest {}), goal >= {:.1} hrs",
        streaks.sleep.current, streaks.sleep.longest, goals.sleep_goal_hours
    )?;
    writeln!(
        out,
        "Water streak: {} (longest {}), goal >= {:.1} L",
        streaks.water.current, streaks.water.longest, goals.water_goal_litres
    )?;
    writeln!(out)?;
    writeln!(out, "Goals met per day (0-2):")?;
    for status in daily_goal_status(&entries, goals) {
        let bar = "#".repeat(usize::from(status.goals_met));
        writeln!(out, "{} | {:<2} {}", status.date, bar, status.goals_met)?;
    }
    Ok(())
}

/// Appends an averaged snapshot of all entries to the export file.
///
/// Returns `false` without touching the file when there is nothing to export.
pub fn export<W: Write>(tracker: &Tracker, out: &mut W) -> AppResult<bool> {
    let entries = tracker.store.load()?;
    if entries.is_empty() {
        writeln!(out, "No data to export.")?;
        return Ok(false);
    }

    let path = tracker.config.export_file();
    append_snapshot(&path, &summarize(&entries))?;
    writeln!(out, "Your summary has been exported to {}", path.display())?;
    Ok(true)
}
