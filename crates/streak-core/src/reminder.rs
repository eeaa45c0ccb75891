//! Reminder policy: whether a scheduled check-in should post a reminder,
//! and what it says. Delivery is left to the caller.

use crate::calendar::CalendarDate;
use crate::config::ReminderConfig;
use crate::error::{Result, StreakError};
use crate::record::TrackerRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Custom-id prefix of the completion button attached to a reminder.
pub const BUTTON_PREFIX: &str = "cleaning_done_";
pub const BUTTON_LABEL: &str = "✅ Done!";

// ---------------------------------------------------------------------------
// ReminderSlot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderSlot {
    Daily,
    FollowUp,
}

impl ReminderSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderSlot::Daily => "daily",
            ReminderSlot::FollowUp => "follow-up",
        }
    }

    pub fn hour(self, cfg: &ReminderConfig) -> u32 {
        match self {
            ReminderSlot::Daily => cfg.daily_hour,
            ReminderSlot::FollowUp => cfg.follow_up_hour,
        }
    }

    /// The slot scheduled at `hour`, if any. Daily wins if both share an hour.
    pub fn at_hour(hour: u32, cfg: &ReminderConfig) -> Option<Self> {
        [ReminderSlot::Daily, ReminderSlot::FollowUp]
            .into_iter()
            .find(|slot| slot.hour(cfg) == hour)
    }

    /// Human label, e.g. "5 PM" or "10 PM Follow-up".
    pub fn label(self, cfg: &ReminderConfig) -> String {
        let clock = twelve_hour(self.hour(cfg));
        match self {
            ReminderSlot::Daily => clock,
            ReminderSlot::FollowUp => format!("{clock} Follow-up"),
        }
    }
}

impl fmt::Display for ReminderSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReminderSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ReminderSlot::Daily),
            "follow-up" | "followup" => Ok(ReminderSlot::FollowUp),
            other => Err(format!("unknown reminder slot '{other}' (expected daily or follow-up)")),
        }
    }
}

fn twelve_hour(hour: u32) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h} {suffix}")
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub slot: ReminderSlot,
    pub date: CalendarDate,
    pub content: String,
    pub button_label: &'static str,
    pub button_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Paused,
    AlreadyCompleted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::Paused => "reminders are paused",
            SkipReason::AlreadyCompleted => "today is already completed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReminderPlan {
    Send { reminder: Reminder },
    Skip { slot: ReminderSlot, reason: SkipReason },
}

/// Decide what the `slot` check-in on `today` should do.
///
/// The follow-up depends only on the record, not on whether the daily
/// reminder went out: a failed or missed daily post must not silence it.
pub fn plan(
    record: &TrackerRecord,
    today: CalendarDate,
    slot: ReminderSlot,
    cfg: &ReminderConfig,
) -> ReminderPlan {
    if record.is_paused {
        return ReminderPlan::Skip {
            slot,
            reason: SkipReason::Paused,
        };
    }
    if record.contains(today) {
        return ReminderPlan::Skip {
            slot,
            reason: SkipReason::AlreadyCompleted,
        };
    }

    let content = format!(
        "@everyone 🧹 **Daily Cleaning Reminder** ({})\n\nTime for your 30-minute cleanup! Click the button below when you're done.",
        slot.label(cfg)
    );
    ReminderPlan::Send {
        reminder: Reminder {
            slot,
            date: today,
            content,
            button_label: BUTTON_LABEL,
            button_id: button_id(today),
        },
    }
}

// ---------------------------------------------------------------------------
// Button ids
// ---------------------------------------------------------------------------

pub fn button_id(date: CalendarDate) -> String {
    format!("{BUTTON_PREFIX}{date}")
}

/// Date carried by a completion button. `Ok(None)` for ids that belong to
/// some other button; an error when the prefix matches but the date is bad.
pub fn parse_button_id(id: &str) -> Result<Option<CalendarDate>> {
    match id.strip_prefix(BUTTON_PREFIX) {
        Some(rest) => CalendarDate::parse(rest).map(Some),
        None if id == BUTTON_PREFIX.trim_end_matches('_') => {
            Err(StreakError::InvalidDate(String::new()))
        }
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
