use crate::calendar::CalendarDate;
use crate::milestone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// TrackerRecord
// ---------------------------------------------------------------------------

/// The single persisted record. Serialized as
/// `{ completedDates, cycleStartDate, isPaused, lastMilestone }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredRecord")]
pub struct TrackerRecord {
    /// Ascending, no duplicates.
    pub completed_dates: BTreeSet<CalendarDate>,
    /// Equals the earliest completed date once anything has been completed;
    /// holds the day the cycle was (re)started while the set is empty.
    pub cycle_start_date: CalendarDate,
    pub is_paused: bool,
    pub last_milestone: u32,
}

impl TrackerRecord {
    pub fn fresh(today: CalendarDate) -> Self {
        Self {
            completed_dates: BTreeSet::new(),
            cycle_start_date: today,
            is_paused: false,
            last_milestone: 0,
        }
    }

    pub fn total_completed(&self) -> usize {
        self.completed_dates.len()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Start of the cycle as callers see it: `None` until a day is completed.
    pub fn cycle_start(&self) -> Option<CalendarDate> {
        if self.completed_dates.is_empty() {
            None
        } else {
            Some(self.cycle_start_date)
        }
    }

    /// Add `date`. Returns `false` (and changes nothing) when it is already
    /// present. Keeps `cycle_start_date` pinned to the earliest date.
    pub fn insert(&mut self, date: CalendarDate) -> bool {
        if !self.completed_dates.insert(date) {
            return false;
        }
        if let Some(first) = self.completed_dates.first() {
            self.cycle_start_date = *first;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

/// What is actually read from disk, before invariants are enforced.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    completed_dates: Vec<CalendarDate>,
    cycle_start_date: CalendarDate,
    #[serde(default)]
    is_paused: bool,
    #[serde(default)]
    last_milestone: u32,
}

impl TryFrom<StoredRecord> for TrackerRecord {
    type Error = String;

    fn try_from(raw: StoredRecord) -> Result<Self, Self::Error> {
        if !milestone::is_known(raw.last_milestone) {
            return Err(format!("unknown lastMilestone {}", raw.last_milestone));
        }

        let listed = raw.completed_dates.len();
        let completed_dates: BTreeSet<CalendarDate> = raw.completed_dates.into_iter().collect();
        if completed_dates.len() != listed {
            tracing::warn!(
                listed,
                distinct = completed_dates.len(),
                "dropping duplicate completed dates from stored record"
            );
        }

        let cycle_start_date = match completed_dates.first() {
            Some(first) if *first != raw.cycle_start_date => {
                tracing::warn!(
                    stored = %raw.cycle_start_date,
                    earliest = %first,
                    "stored cycle start does not match earliest completed date; using earliest"
                );
                *first
            }
            _ => raw.cycle_start_date,
        };

        Ok(TrackerRecord {
            completed_dates,
            cycle_start_date,
            is_paused: raw.is_paused,
            last_milestone: raw.last_milestone,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn fresh_record_has_no_cycle_start() {
        let rec = TrackerRecord::fresh(d("2024-03-01"));
        assert_eq!(rec.total_completed(), 0);
        assert_eq!(rec.cycle_start(), None);
        assert_eq!(rec.cycle_start_date, d("2024-03-01"));
        assert!(!rec.is_paused);
        assert_eq!(rec.last_milestone, 0);
    }

    #[test]
    fn insert_tracks_earliest_date() {
        let mut rec = TrackerRecord::fresh(d("2024-03-10"));
        assert!(rec.insert(d("2024-03-05")));
        assert_eq!(rec.cycle_start(), Some(d("2024-03-05")));
        assert!(rec.insert(d("2024-03-08")));
        assert_eq!(rec.cycle_start(), Some(d("2024-03-05")));
        assert!(rec.insert(d("2024-02-28")));
        assert_eq!(rec.cycle_start(), Some(d("2024-02-28")));
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut rec = TrackerRecord::fresh(d("2024-03-10"));
        assert!(rec.insert(d("2024-03-10")));
        assert!(!rec.insert(d("2024-03-10")));
        assert_eq!(rec.total_completed(), 1);
    }

    #[test]
    fn serializes_with_camel_case_keys_in_date_order() {
        let mut rec = TrackerRecord::fresh(d("2024-01-01"));
        rec.insert(d("2024-01-03"));
        rec.insert(d("2024-01-02"));
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "completedDates": ["2024-01-02", "2024-01-03"],
                "cycleStartDate": "2024-01-02",
                "isPaused": false,
                "lastMilestone": 0,
            })
        );
    }

    #[test]
    fn load_normalises_duplicates_and_cycle_start() {
        let json = r#"{
            "completedDates": ["2024-01-03", "2024-01-01", "2024-01-03"],
            "cycleStartDate": "2024-01-03",
            "isPaused": true,
            "lastMilestone": 0
        }"#;
        let rec: TrackerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.total_completed(), 2);
        assert_eq!(rec.cycle_start(), Some(d("2024-01-01")));
        assert!(rec.is_paused);
    }

    #[test]
    fn load_rejects_unknown_milestone() {
        let json = r#"{"completedDates": [], "cycleStartDate": "2024-01-01", "lastMilestone": 9}"#;
        assert!(serde_json::from_str::<TrackerRecord>(json).is_err());
    }

    #[test]
    fn load_rejects_malformed_date() {
        let json = r#"{"completedDates": ["2024-1-1"], "cycleStartDate": "2024-01-01"}"#;
        assert!(serde_json::from_str::<TrackerRecord>(json).is_err());
    }
}
