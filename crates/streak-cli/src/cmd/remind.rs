use crate::clock::CliTracker;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use streak_core::config::Config;
use streak_core::reminder::{ReminderPlan, ReminderSlot};

pub fn run(
    root: &Path,
    tracker: &CliTracker,
    slot: Option<ReminderSlot>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    let slot = match slot {
        Some(slot) => slot,
        None => {
            let hour = tracker.hour();
            match ReminderSlot::at_hour(hour, &config.reminders) {
                Some(slot) => slot,
                None => {
                    if json {
                        return print_json(&serde_json::json!({
                            "action": "none",
                            "hour": hour,
                        }));
                    }
                    println!("No reminder is scheduled at {hour}:00 Eastern.");
                    return Ok(());
                }
            }
        }
    };

    let plan = tracker
        .plan_reminder(slot, &config.reminders)
        .context("failed to plan reminder")?;

    if json {
        return print_json(&plan);
    }

    match plan {
        ReminderPlan::Send { reminder } => {
            println!("{}", reminder.content);
            println!();
            println!("[{}]  ({})", reminder.button_label, reminder.button_id);
        }
        ReminderPlan::Skip { slot, reason } => {
            println!("Skipping {} reminder: {reason}.", slot.label(&config.reminders));
        }
    }
    Ok(())
}
