use crate::calendar::CalendarDate;
use crate::record::TrackerRecord;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub current_streak: u32,
    pub total_completed: usize,
    pub cycle_start_date: Option<CalendarDate>,
    pub is_paused: bool,
    pub last_milestone: u32,
    pub completed_dates: Vec<CalendarDate>,
}

impl Stats {
    pub fn from_record(record: &TrackerRecord) -> Self {
        let current_streak = current_streak(&record.completed_dates);
        tracing::debug!(
            total = record.total_completed(),
            latest = ?record.completed_dates.last().map(|d| d.to_string()),
            current_streak,
            "computed streak"
        );
        Self {
            current_streak,
            total_completed: record.total_completed(),
            cycle_start_date: record.cycle_start(),
            is_paused: record.is_paused,
            last_milestone: record.last_milestone,
            completed_dates: record.completed_dates.iter().copied().collect(),
        }
    }
}

/// Length of the run of consecutive calendar days that ends at the most
/// recent completed date. The run does not have to reach today.
pub fn current_streak(dates: &BTreeSet<CalendarDate>) -> u32 {
    let mut newest_first = dates.iter().rev();
    let Some(mut later) = newest_first.next().copied() else {
        return 0;
    };
    let mut streak = 1;
    for &earlier in newest_first {
        if later.days_since(earlier) != 1 {
            break;
        }
        streak += 1;
        later = earlier;
    }
    streak
}

/// Ten-cell text bar, e.g. `[███░░░░░░░] 9/30 days`. Overshooting `total`
/// renders a full bar.
pub fn progress_bar(current: usize, total: usize) -> String {
    let filled = if total == 0 {
        10
    } else {
        let ratio = (current as f64 / total as f64).min(1.0);
        (ratio * 10.0).round() as usize
    };
    format!(
        "[{}{}] {current}/{total} days",
        "█".repeat(filled),
        "░".repeat(10 - filled)
    )
}
