//! Append/update store of time entries and the derived latest-detail
//! index. The ledger is the single source of truth, every reporting view
//! is recomputed from its current contents.

pub mod entry;
pub mod error;

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use entry::{LatestDetail, TimeEntry};
use error::LedgerError;

/// Placeholder timestamp for default tasks that have no ledger history
/// yet. Far enough in the future to survive any lookback cutoff.
pub fn far_future() -> DateTime<Utc> {
    Utc.from_utc_datetime(&NaiveDateTime::new(
        NaiveDate::from_ymd_opt(9999, 12, 31).expect("sentinel date is valid"),
        NaiveTime::MIN,
    ))
}

/// In-memory ledger keyed by entry timestamp. Writes go through
/// [Ledger::append] and [Ledger::update], which refresh the latest-detail
/// index in the same call; validation happens before any mutation so a
/// failed write leaves both structures untouched.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    entries: BTreeMap<DateTime<Utc>, TimeEntry>,
    latest_details: HashMap<Arc<str>, LatestDetail>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new entry. Fails with [LedgerError::DuplicateTimestamp] if
    /// an entry already exists at that exact timestamp; the existing entry
    /// is left unchanged.
    pub fn append(&mut self, entry: TimeEntry) -> Result<(), LedgerError> {
        if self.entries.contains_key(&entry.timestamp) {
            return Err(LedgerError::DuplicateTimestamp(entry.timestamp));
        }
        self.refresh_latest_detail(&entry);
        self.entries.insert(entry.timestamp, entry);
        Ok(())
    }

    /// Overwrites the entry at `timestamp`. Fails with
    /// [LedgerError::NotFound] when nothing exists there.
    pub fn update(
        &mut self,
        timestamp: DateTime<Utc>,
        task: &str,
        detail: &str,
        duration_minutes: i64,
    ) -> Result<(), LedgerError> {
        let entry = TimeEntry::new(timestamp, task, detail, duration_minutes)?;
        if !self.entries.contains_key(&timestamp) {
            return Err(LedgerError::NotFound(timestamp));
        }
        self.refresh_latest_detail(&entry);
        self.entries.insert(timestamp, entry);
        Ok(())
    }

    // Last write wins on write order, not on timestamp value: an edit to a
    // historical entry replaces whatever the index holds, even when the
    // stored row is newer.
    fn refresh_latest_detail(&mut self, entry: &TimeEntry) {
        self.latest_details.insert(
            entry.task.clone(),
            LatestDetail {
                task: entry.task.clone(),
                detail: entry.detail.clone(),
                last_timestamp: entry.timestamp,
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All entries ordered by timestamp ascending.
    pub fn all_entries(&self) -> impl Iterator<Item = &TimeEntry> {
        self.entries.values()
    }

    /// Entries with `start <= timestamp <= end`, ordered by timestamp
    /// ascending.
    pub fn entries_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &TimeEntry> {
        self.entries.range(start..=end).map(|(_, v)| v)
    }

    pub fn latest_detail(&self, task: &str) -> Option<&LatestDetail> {
        self.latest_details.get(task)
    }

    /// The most recent entry at or before `at`. Used to pre-fill the next
    /// entry with whatever was being worked on last.
    pub fn last_task_and_detail(&self, at: DateTime<Utc>) -> Option<&TimeEntry> {
        self.entries.range(..=at).next_back().map(|(_, v)| v)
    }

    /// Distinct details recorded against `task`, most recently used first,
    /// capped at 10.
    pub fn details_for_task(&self, task: &str) -> Vec<Arc<str>> {
        let mut last_used: HashMap<Arc<str>, DateTime<Utc>> = HashMap::new();
        for entry in self.entries.values().filter(|v| &*v.task == task) {
            // ascending iteration, a later insert is always more recent
            last_used.insert(entry.detail.clone(), entry.timestamp);
        }
        let mut details = last_used.into_iter().collect::<Vec<_>>();
        details.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        details.into_iter().take(10).map(|(d, _)| d).collect()
    }

    /// Drop-down source: every default task first, in default-set order,
    /// resolved against the index (empty detail and a far-future timestamp
    /// when the task has no history), followed by non-default tasks seen
    /// within the lookback window, ordered task then detail.
    pub fn task_detail_with_defaults(
        &self,
        default_tasks: &[String],
        now: DateTime<Utc>,
        lookback_weeks: u32,
    ) -> Vec<LatestDetail> {
        let cutoff = now - Duration::weeks(lookback_weeks as i64);

        let mut rows = default_tasks
            .iter()
            .map(|task| {
                self.latest_details
                    .get(task.as_str())
                    .cloned()
                    .unwrap_or_else(|| LatestDetail {
                        task: task.as_str().into(),
                        detail: "".into(),
                        last_timestamp: far_future(),
                    })
            })
            .collect::<Vec<_>>();

        let mut others = self
            .latest_details
            .values()
            .filter(|v| !default_tasks.iter().any(|d| d.as_str() == &*v.task))
            .filter(|v| v.last_timestamp >= cutoff)
            .cloned()
            .collect::<Vec<_>>();
        others.sort_by(|a, b| a.task.cmp(&b.task).then_with(|| a.detail.cmp(&b.detail)));

        rows.extend(others);
        rows
    }
}
