use crate::clock::CliTracker;
use anyhow::Context;
use std::path::Path;
use streak_core::{config::Config, io, paths};

pub fn run(root: &Path, tracker: &CliTracker) -> anyhow::Result<()> {
    println!("Initializing streak tracker in: {}", root.display());

    // 1. Create .streak/
    let dir = paths::streak_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    // 2. Write config.yaml if missing
    if !paths::config_path(root).exists() {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    // 3. Load (and on first run, create) the tracker record
    let existed = tracker.store().path().exists();
    tracker.tracker().context("failed to load tracker record")?;
    if existed {
        println!("  exists:  {}", paths::TRACKER_FILE);
    } else {
        println!("  created: {}", paths::TRACKER_FILE);
    }

    Ok(())
}
