use anyhow::{bail, Context};
use streak_core::{CalendarDate, Clock, SystemClock, Tracker};

/// Wall clock unless `--today` / `STREAK_TODAY` pins the date or
/// `--hour` / `STREAK_HOUR` pins the hour. Each override applies on its own.
pub struct CliClock {
    system: SystemClock,
    date: Option<CalendarDate>,
    hour: Option<u32>,
}

impl CliClock {
    pub fn from_overrides(today: Option<&str>, hour: Option<u32>) -> anyhow::Result<Self> {
        let date = today
            .map(CalendarDate::parse)
            .transpose()
            .context("invalid --today override")?;
        if let Some(h) = hour {
            if h > 23 {
                bail!("invalid --hour override {h}: expected 0-23");
            }
        }
        Ok(CliClock {
            system: SystemClock,
            date,
            hour,
        })
    }
}

impl Clock for CliClock {
    fn today(&self) -> CalendarDate {
        self.date.unwrap_or_else(|| self.system.today())
    }

    fn hour(&self) -> u32 {
        self.hour.unwrap_or_else(|| self.system.hour())
    }
}

pub type CliTracker = Tracker<CliClock>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_pin_date_and_hour_independently() {
        let clock = CliClock::from_overrides(Some("2024-04-02"), Some(17)).unwrap();
        assert_eq!(clock.today(), CalendarDate::parse("2024-04-02").unwrap());
        assert_eq!(clock.hour(), 17);

        let date_only = CliClock::from_overrides(Some("2024-04-02"), None).unwrap();
        assert_eq!(date_only.today(), CalendarDate::parse("2024-04-02").unwrap());
        assert!(date_only.hour() <= 23);
    }

    #[test]
    fn bad_overrides_are_rejected() {
        assert!(CliClock::from_overrides(Some("April 2"), None).is_err());
        assert!(CliClock::from_overrides(None, Some(24)).is_err());
    }
}
