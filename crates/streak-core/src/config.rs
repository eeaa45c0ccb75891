use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ReminderConfig
// ---------------------------------------------------------------------------

/// Hours (0-23, reference timezone) at which the scheduler checks in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_daily_hour")]
    pub daily_hour: u32,
    #[serde(default = "default_follow_up_hour")]
    pub follow_up_hour: u32,
}

fn default_daily_hour() -> u32 {
    17
}

fn default_follow_up_hour() -> u32 {
    22
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            daily_hour: default_daily_hour(),
            follow_up_hour: default_follow_up_hour(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Completions needed to finish a cycle; drives the progress bar.
    #[serde(default = "default_goal_days")]
    pub goal_days: usize,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

fn default_version() -> u32 {
    1
}

fn default_goal_days() -> usize {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            goal_days: default_goal_days(),
            reminders: ReminderConfig::default(),
        }
    }
}

impl Config {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load `.streak/config.yaml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let r = &self.reminders;

        for (name, hour) in [("daily_hour", r.daily_hour), ("follow_up_hour", r.follow_up_hour)] {
            if hour > 23 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("reminders.{name} = {hour} is not an hour of the day (0-23)"),
                });
            }
        }

        if r.follow_up_hour <= r.daily_hour {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "follow-up reminder ({}:00) is not after the daily reminder ({}:00)",
                    r.follow_up_hour, r.daily_hour
                ),
            });
        }

        if self.goal_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "goal_days must be at least 1".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.goal_days, 30);
        assert_eq!(cfg.reminders.daily_hour, 17);
        assert_eq!(cfg.reminders.follow_up_hour, 22);
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.goal_days = 21;
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().goal_days, 21);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".streak")).unwrap();
        std::fs::write(
            dir.path().join(".streak/config.yaml"),
            "reminders:\n  daily_hour: 18\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.reminders.daily_hour, 18);
        assert_eq!(cfg.reminders.follow_up_hour, 22);
        assert_eq!(cfg.goal_days, 30);
    }

    #[test]
    fn unparseable_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".streak")).unwrap();
        std::fs::write(dir.path().join(".streak/config.yaml"), "goal_days: [").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_hours_and_goal() {
        let cfg = Config {
            version: 1,
            goal_days: 0,
            reminders: ReminderConfig {
                daily_hour: 25,
                follow_up_hour: 9,
            },
        };
        let warnings = cfg.validate();
        assert_eq!(
            warnings.iter().filter(|w| w.level == WarnLevel::Error).count(),
            2
        );
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("not after")));
    }
}
