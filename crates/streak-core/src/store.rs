use crate::calendar::CalendarDate;
use crate::error::{Result, StreakError};
use crate::paths;
use crate::record::TrackerRecord;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Owns the on-disk tracker record.
///
/// Every public method holds the store lock for its whole duration: an
/// in-process mutex plus an exclusive advisory lock on a sidecar
/// `tracker.lock` file. A read-modify-write done through
/// [`TrackerStore::update`] is therefore never interleaved with another
/// one, whether it comes from another thread or another `streak` process.
#[derive(Debug)]
pub struct TrackerStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock: Mutex<()>,
}

/// Held while the store is in use. Closing the lock file releases the
/// advisory lock.
struct StoreGuard<'a> {
    _local: MutexGuard<'a, ()>,
    _file: File,
}

impl TrackerStore {
    /// Store rooted at `<root>/.streak/tracker.json`.
    pub fn new(root: &Path) -> Self {
        Self::at(paths::tracker_path(root))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            lock_path: path.with_extension("lock"),
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Current record. When no record exists yet a fresh one starting
    /// `today` is written and returned. A record that exists but cannot be
    /// read is an error, never silently replaced.
    pub fn load(&self, today: CalendarDate) -> Result<TrackerRecord> {
        let _guard = self.guard()?;
        self.read_or_init(today)
    }

    /// Replace the stored record wholesale.
    pub fn save(&self, record: &TrackerRecord) -> Result<()> {
        let _guard = self.guard()?;
        self.write(record)
    }

    /// Load, hand the record to `f`, and persist it if `f` changed it. The
    /// lock is held for the whole sequence.
    pub fn update<T>(
        &self,
        today: CalendarDate,
        f: impl FnOnce(&mut TrackerRecord) -> Result<T>,
    ) -> Result<T> {
        let _guard = self.guard()?;
        let mut record = self.read_or_init(today)?;
        let before = record.clone();
        let out = f(&mut record)?;
        if record != before {
            self.write(&record)?;
        }
        Ok(out)
    }

    // ---------------------------------------------------------------------------
    // Internals (caller holds the lock)
    // ---------------------------------------------------------------------------

    fn guard(&self) -> Result<StoreGuard<'_>> {
        let local = self.lock.lock().map_err(|_| StreakError::LockPoisoned)?;
        if let Some(parent) = self.lock_path.parent() {
            crate::io::ensure_dir(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| StreakError::storage(&self.lock_path, e))?;
        file.lock_exclusive()
            .map_err(|e| StreakError::storage(&self.lock_path, e))?;
        Ok(StoreGuard {
            _local: local,
            _file: file,
        })
    }

    /// Reads the record, creating it when absent. A record that had to be
    /// normalised on the way in is written back once in its repaired form.
    fn read_or_init(&self, today: CalendarDate) -> Result<TrackerRecord> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let record = TrackerRecord::fresh(today);
                self.write(&record)?;
                tracing::info!(path = %self.path.display(), cycle_start = %today, "initialized tracker record");
                return Ok(record);
            }
            Err(e) => return Err(StreakError::storage(&self.path, e)),
        };
        let stored: serde_json::Value =
            serde_json::from_str(&data).map_err(|e| StreakError::storage(&self.path, e))?;
        let record: TrackerRecord = serde_json::from_value(stored.clone())
            .map_err(|e| StreakError::storage(&self.path, e))?;
        if serde_json::to_value(&record)? != stored {
            self.write(&record)?;
            tracing::info!(path = %self.path.display(), "rewrote normalised tracker record");
        }
        Ok(record)
    }

    fn write(&self, record: &TrackerRecord) -> Result<()> {
        let data = serde_json::to_string_pretty(record)?;
        crate::io::atomic_write(&self.path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn load_initializes_missing_record() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        assert!(!store.path().exists());

        let rec = store.load(d("2024-06-01")).unwrap();
        assert_eq!(rec, TrackerRecord::fresh(d("2024-06-01")));
        assert!(store.path().exists());

        // A later load on a different day sees the persisted record.
        let again = store.load(d("2024-06-09")).unwrap();
        assert_eq!(again.cycle_start_date, d("2024-06-01"));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        let mut rec = TrackerRecord::fresh(d("2024-06-01"));
        rec.insert(d("2024-06-01"));
        rec.is_paused = true;
        store.save(&rec).unwrap();

        assert_eq!(store.load(d("2024-07-01")).unwrap(), rec);
    }

    #[test]
    fn corrupt_record_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join(".streak")).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.load(d("2024-06-01")),
            Err(StreakError::Storage { .. })
        ));
        // The corrupt file is left for a human to inspect.
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn update_skips_write_when_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        store.load(d("2024-06-01")).unwrap();
        std::fs::write(store.path(), std::fs::read_to_string(store.path()).unwrap() + "\n").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        store.update(d("2024-06-01"), |_| Ok(())).unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn failed_update_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        store.load(d("2024-06-01")).unwrap();

        let res: Result<()> = store.update(d("2024-06-01"), |rec| {
            rec.insert(d("2024-06-01"));
            Err(StreakError::InvalidDate("boom".into()))
        });
        assert!(res.is_err());
        assert_eq!(store.load(d("2024-06-01")).unwrap().total_completed(), 0);
    }

    #[test]
    fn normalised_record_is_written_back_once() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        std::fs::create_dir_all(dir.path().join(".streak")).unwrap();
        std::fs::write(
            store.path(),
            r#"{"completedDates":["2024-06-03","2024-06-02","2024-06-03"],"cycleStartDate":"2024-06-05","isPaused":false,"lastMilestone":0}"#,
        )
        .unwrap();

        let rec = store.load(d("2024-06-10")).unwrap();
        assert_eq!(rec.total_completed(), 2);
        assert_eq!(rec.cycle_start_date, d("2024-06-02"));

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk["completedDates"], serde_json::json!(["2024-06-02", "2024-06-03"]));
        assert_eq!(on_disk["cycleStartDate"], "2024-06-02");

        // Already clean: a second load leaves the bytes alone.
        let written = std::fs::read_to_string(store.path()).unwrap();
        store.load(d("2024-06-10")).unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), written);
    }

    #[test]
    fn lock_file_sits_next_to_the_record() {
        let dir = TempDir::new().unwrap();
        let store = TrackerStore::new(dir.path());
        assert_eq!(store.lock_path(), dir.path().join(".streak/tracker.lock"));
        store.load(d("2024-06-01")).unwrap();
        assert!(store.lock_path().exists());
    }

    #[test]
    fn separate_stores_on_one_file_do_not_lose_inserts() {
        // Each thread opens its own store, as separate processes would, so
        // only the file lock keeps them apart.
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        let handles: Vec<_> = (1..=20)
            .map(|day| {
                let root = root.clone();
                std::thread::spawn(move || {
                    let store = TrackerStore::new(&root);
                    let date = CalendarDate::from_ymd(2024, 5, day).unwrap();
                    store
                        .update(date, |rec| {
                            rec.insert(date);
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let rec = TrackerStore::new(&root).load(d("2024-05-31")).unwrap();
        assert_eq!(rec.total_completed(), 20);
    }

    #[test]
    fn concurrent_updates_do_not_lose_inserts() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(TrackerStore::new(dir.path()));
        let handles: Vec<_> = (1..=20)
            .map(|day| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let date = CalendarDate::from_ymd(2024, 4, day).unwrap();
                    store
                        .update(date, |rec| {
                            rec.insert(date);
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let rec = store.load(d("2024-04-30")).unwrap();
        assert_eq!(rec.total_completed(), 20);
        assert_eq!(rec.cycle_start(), Some(d("2024-04-01")));
    }
}
