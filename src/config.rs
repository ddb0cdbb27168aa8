//! Options consumed, not computed, by the core: interval granularity,
//! the default task set, the drop-down lookback and the fortnightly
//! commitment target. Loaded from `config.json` in the application
//! directory; a missing file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::report::commitment::DEFAULT_FORTNIGHT_COMMITMENT_MINUTES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorklogConfig {
    /// Granularity of entries in minutes.
    pub interval_minutes: u32,
    /// Tasks that always appear in the drop-down, in this order.
    pub default_tasks: Vec<String>,
    /// How many weeks of history feed the drop-down.
    pub lookback_weeks: u32,
    /// Fortnightly time target in minutes.
    pub fortnight_commitment_minutes: u32,
}

impl Default for WorklogConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 15,
            default_tasks: vec!["Lunch Break".into(), "Admin".into(), "Meetings".into()],
            lookback_weeks: 2,
            fortnight_commitment_minutes: DEFAULT_FORTNIGHT_COMMITMENT_MINUTES,
        }
    }
}

impl WorklogConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str::<WorklogConfig>(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {path:?}, using defaults");
                WorklogConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fortnight_commitment_minutes == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "fortnight_commitment_minutes must be positive".into(),
            ));
        }
        if self.interval_minutes == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "interval_minutes must be positive".into(),
            ));
        }
        Ok(())
    }
}
