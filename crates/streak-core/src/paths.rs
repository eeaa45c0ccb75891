use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const STREAK_DIR: &str = ".streak";
pub const TRACKER_FILE: &str = ".streak/tracker.json";
pub const CONFIG_FILE: &str = ".streak/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn streak_dir(root: &Path) -> PathBuf {
    root.join(STREAK_DIR)
}

pub fn tracker_path(root: &Path) -> PathBuf {
    root.join(TRACKER_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/home");
        assert_eq!(
            tracker_path(root),
            PathBuf::from("/tmp/home/.streak/tracker.json")
        );
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/home/.streak/config.yaml")
        );
        assert_eq!(streak_dir(root), PathBuf::from("/tmp/home/.streak"));
    }
}
