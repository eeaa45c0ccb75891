use crate::calendar::{CalendarDate, Clock, SystemClock};
use crate::config::ReminderConfig;
use crate::error::Result;
use crate::milestone::{self, Celebration};
use crate::record::TrackerRecord;
use crate::reminder::{self, ReminderPlan, ReminderSlot};
use crate::stats::Stats;
use crate::store::TrackerStore;
use serde::Serialize;

// ---------------------------------------------------------------------------
// MarkOutcome
// ---------------------------------------------------------------------------

/// Result of marking a day complete, ready for a front end to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkOutcome {
    pub message: String,
    pub date: CalendarDate,
    pub already_done: bool,
    /// Present whenever the day was newly recorded.
    pub stats: Option<Stats>,
    /// Present only when this completion crossed a new threshold.
    pub milestone: Option<Celebration>,
}

impl MarkOutcome {
    fn already_done(date: CalendarDate) -> Self {
        Self {
            message: "This day was already marked as complete!".to_string(),
            date,
            already_done: true,
            stats: None,
            milestone: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// The streak engine. Each operation is one load → validate → mutate → save
/// transaction against the store.
#[derive(Debug)]
pub struct Tracker<C: Clock = SystemClock> {
    store: TrackerStore,
    clock: C,
}

impl<C: Clock> Tracker<C> {
    pub fn new(store: TrackerStore, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &TrackerStore {
        &self.store
    }

    /// Today in the reference timezone, as this engine's clock sees it.
    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Current hour in the reference timezone, as this engine's clock sees it.
    pub fn hour(&self) -> u32 {
        self.clock.hour()
    }

    /// The raw persisted record, initialising it if absent.
    pub fn tracker(&self) -> Result<TrackerRecord> {
        self.store.load(self.today())
    }

    /// Record `date` (default: today) as done by `actor`.
    ///
    /// Past and future dates are both accepted. Marking a date twice is not
    /// an error: the second call reports `already_done` and changes nothing.
    pub fn mark_complete(&self, date: Option<&str>, actor: &str) -> Result<MarkOutcome> {
        let today = self.today();
        let date = match date {
            Some(s) => CalendarDate::parse(s)?,
            None => today,
        };

        self.store.update(today, |record| {
            if !record.insert(date) {
                tracing::debug!(%date, "date already marked complete");
                return Ok(MarkOutcome::already_done(date));
            }

            let crossed = milestone::next_crossed(record.total_completed(), record.last_milestone);
            if let Some(t) = crossed {
                record.last_milestone = t;
            }
            let stats = Stats::from_record(record);

            tracing::info!(
                %date,
                actor,
                total = stats.total_completed,
                streak = stats.current_streak,
                milestone = ?crossed,
                "marked day complete"
            );

            Ok(MarkOutcome {
                message: format!(
                    "Cleaning marked as done by {actor}! 🎉 Current streak: {} days",
                    stats.current_streak
                ),
                date,
                already_done: false,
                stats: Some(stats),
                milestone: crossed.and_then(milestone::celebration).cloned(),
            })
        })
    }

    pub fn stats(&self) -> Result<Stats> {
        let record = self.tracker()?;
        Ok(Stats::from_record(&record))
    }

    /// Throw away all progress and start a new cycle today.
    pub fn reset_cycle(&self) -> Result<TrackerRecord> {
        let fresh = TrackerRecord::fresh(self.today());
        self.store.save(&fresh)?;
        tracing::info!(cycle_start = %fresh.cycle_start_date, "cycle reset");
        Ok(fresh)
    }

    /// Same as [`Tracker::reset_cycle`].
    pub fn cancel_cycle(&self) -> Result<TrackerRecord> {
        self.reset_cycle()
    }

    pub fn pause_reminders(&self) -> Result<()> {
        self.set_paused(true)
    }

    pub fn resume_reminders(&self) -> Result<()> {
        self.set_paused(false)
    }

    pub fn is_today_completed(&self) -> Result<bool> {
        let today = self.today();
        Ok(self.store.load(today)?.contains(today))
    }

    /// What the `slot` check-in should do today. Read-only.
    pub fn plan_reminder(&self, slot: ReminderSlot, cfg: &ReminderConfig) -> Result<ReminderPlan> {
        let today = self.today();
        let record = self.store.load(today)?;
        let plan = reminder::plan(&record, today, slot, cfg);
        tracing::debug!(%slot, ?plan, "planned reminder");
        Ok(plan)
    }

    fn set_paused(&self, paused: bool) -> Result<()> {
        self.store.update(self.today(), |record| {
            record.is_paused = paused;
            Ok(())
        })?;
        tracing::info!(paused, "reminder pause flag updated");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
