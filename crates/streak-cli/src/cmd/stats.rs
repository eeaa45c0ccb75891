use crate::clock::CliTracker;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use streak_core::config::Config;
use streak_core::stats::progress_bar;

pub fn run(root: &Path, tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let stats = tracker.stats().context("failed to load tracker record")?;

    if json {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct StatsOutput<'a> {
            #[serde(flatten)]
            stats: &'a streak_core::stats::Stats,
            goal_days: usize,
            progress_bar: String,
        }
        return print_json(&StatsOutput {
            stats: &stats,
            goal_days: config.goal_days,
            progress_bar: progress_bar(stats.total_completed, config.goal_days),
        });
    }

    let cycle_start = stats
        .cycle_start_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Not started".to_string());
    let status = if stats.is_paused {
        "⏸️ Paused"
    } else {
        "✅ Active"
    };

    println!("🧹 Cleaning Tracker Stats");
    println!("  Current streak:      {} days", stats.current_streak);
    println!(
        "  Progress to reward:  {}/{} days",
        stats.total_completed, config.goal_days
    );
    println!("  Cycle started:       {cycle_start}");
    println!("  Status:              {status}");
    println!(
        "  {}",
        progress_bar(stats.total_completed, config.goal_days)
    );
    Ok(())
}

pub fn show(tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    let record = tracker.tracker().context("failed to load tracker record")?;
    if json {
        return print_json(&record);
    }

    println!("Record: {}", tracker.store().path().display());
    println!("  cycle start:     {}", record.cycle_start_date);
    println!("  paused:          {}", record.is_paused);
    println!("  last milestone:  {}", record.last_milestone);
    println!("  completed dates: {}", record.total_completed());
    for date in &record.completed_dates {
        println!("    {date}");
    }
    Ok(())
}

pub fn today(tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    let date = tracker.today();
    let completed = tracker
        .is_today_completed()
        .context("failed to load tracker record")?;

    if json {
        return print_json(&serde_json::json!({
            "date": date,
            "completed": completed,
        }));
    }

    if completed {
        println!("{date}: done ✅");
    } else {
        println!("{date}: not done yet");
    }
    Ok(())
}
