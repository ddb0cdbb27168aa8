use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::Serialize;

use super::error::InvalidEntry;

/// One ledger row: a task worked on, for a duration in minutes, ending at
/// `timestamp`. The timestamp is the primary key, no two entries may share
/// one.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize, Clone)]
pub struct TimeEntry {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub task: Arc<str>,
    #[serde(default)]
    pub detail: Arc<str>,
    pub duration_minutes: u32,
}

impl TimeEntry {
    /// Builds a validated entry. The duration comes in signed so that
    /// negative values from callers are rejected rather than wrapped.
    pub fn new(
        timestamp: DateTime<Utc>,
        task: &str,
        detail: &str,
        duration_minutes: i64,
    ) -> Result<Self, InvalidEntry> {
        if task.trim().is_empty() {
            return Err(InvalidEntry::EmptyTask);
        }
        if duration_minutes < 0 {
            return Err(InvalidEntry::NegativeDuration(duration_minutes));
        }
        Ok(Self {
            timestamp,
            task: task.into(),
            detail: detail.into(),
            duration_minutes: duration_minutes as u32,
        })
    }

    pub fn day(&self) -> chrono::NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Most recent free-text detail seen for a task, refreshed on every ledger
/// write for that task.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct LatestDetail {
    pub task: Arc<str>,
    pub detail: Arc<str>,
    pub last_timestamp: DateTime<Utc>,
}
