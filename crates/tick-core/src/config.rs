//! Project configuration, read from `.tick/config.toml`.
//!
//! Every field has a default so a missing or empty file behaves like stock
//! settings. Unknown keys are ignored for forward compatibility.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// Undo/redo tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum undo depth; 0 (the default) keeps history unbounded.
    #[serde(default)]
    pub max_depth: usize,
}

/// Reminder scan tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Seconds between scan passes in watch mode.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Whether audio cues are played at all.
    #[serde(default = "default_true")]
    pub sound: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            sound: default_true(),
        }
    }
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_true() -> bool {
    true
}

impl TickConfig {
    /// Load configuration from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    /// Render the default configuration as a commented starting point.
    #[must_use]
    pub fn starter_toml() -> String {
        concat!(
            "# tick configuration\n",
            "\n",
            "[history]\n",
            "# Maximum undo depth; 0 = unbounded.\n",
            "max_depth = 0\n",
            "\n",
            "[reminders]\n",
            "# Seconds between reminder scans in watch mode.\n",
            "interval_secs = 60\n",
            "# Play terminal audio cues.\n",
            "sound = true\n",
        )
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::TickConfig;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = TickConfig::load(&dir.path().join("config.toml")).expect("loads");
        assert_eq!(config, TickConfig::default());
        assert_eq!(config.reminders.interval_secs, 60);
        assert!(config.reminders.sound);
        assert_eq!(config.history.max_depth, 0);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[history]\nmax_depth = 25\n").expect("writes");
        let config = TickConfig::load(&path).expect("loads");
        assert_eq!(config.history.max_depth, 25);
        assert_eq!(config.reminders.interval_secs, 60);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "history = {").expect("writes");
        assert!(TickConfig::load(&path).is_err());
    }

    #[test]
    fn starter_toml_parses_to_defaults() {
        let config: TickConfig = toml::from_str(&TickConfig::starter_toml()).expect("parses");
        assert_eq!(config, TickConfig::default());
    }
}
