use crate::clock::CliTracker;
use crate::output::{print_celebration, print_json};
use anyhow::Context;
use streak_core::reminder;
use streak_core::tracker::MarkOutcome;

pub fn run(tracker: &CliTracker, date: Option<&str>, actor: &str, json: bool) -> anyhow::Result<()> {
    let outcome = tracker
        .mark_complete(date, actor)
        .context("failed to mark day complete")?;
    render(&outcome, json)
}

/// The reminder-button path: the date comes from the button's custom id.
pub fn press(tracker: &CliTracker, button_id: &str, actor: &str, json: bool) -> anyhow::Result<()> {
    let date = reminder::parse_button_id(button_id)
        .with_context(|| format!("bad completion button '{button_id}'"))?
        .with_context(|| format!("'{button_id}' is not a completion button"))?;
    let outcome = tracker
        .mark_complete(Some(&date.to_string()), actor)
        .context("failed to mark day complete")?;
    render(&outcome, json)
}

fn render(outcome: &MarkOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(outcome);
    }
    println!("{}", outcome.message);
    if let Some(m) = &outcome.milestone {
        print_celebration(m);
    }
    Ok(())
}
