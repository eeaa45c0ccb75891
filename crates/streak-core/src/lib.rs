pub mod calendar;
pub mod config;
pub mod error;
pub mod io;
pub mod milestone;
pub mod paths;
pub mod record;
pub mod reminder;
pub mod stats;
pub mod store;
pub mod tracker;

pub use calendar::{CalendarDate, Clock, FixedClock, SystemClock};
pub use error::{Result, StreakError};
pub use store::TrackerStore;
pub use tracker::Tracker;
