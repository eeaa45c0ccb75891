use crate::clock::CliTracker;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use streak_core::config::Config;

pub fn reset(root: &Path, tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let record = tracker.reset_cycle().context("failed to reset cycle")?;
    if json {
        return print_json(&record);
    }
    println!(
        "🔄 Cycle reset! Starting fresh with a new {}-day goal. Good luck! 🎯",
        config.goal_days
    );
    Ok(())
}

pub fn cancel(tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    let record = tracker.cancel_cycle().context("failed to cancel cycle")?;
    if json {
        return print_json(&record);
    }
    println!(
        "❌ Current cycle cancelled. All progress has been reset. Use `streak reset` to start a new cycle when ready."
    );
    Ok(())
}

pub fn pause(tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    tracker.pause_reminders().context("failed to pause reminders")?;
    if json {
        return print_json(&serde_json::json!({ "is_paused": true }));
    }
    println!("⏸️ Daily reminders paused. Use `streak resume` when you're ready to continue!");
    Ok(())
}

pub fn resume(tracker: &CliTracker, json: bool) -> anyhow::Result<()> {
    tracker
        .resume_reminders()
        .context("failed to resume reminders")?;
    if json {
        return print_json(&serde_json::json!({ "is_paused": false }));
    }
    println!("▶️ Daily reminders resumed! Let's keep that streak going! 🔥");
    Ok(())
}
