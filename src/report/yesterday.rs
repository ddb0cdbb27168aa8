//! Snapshot of the previous working day: the raw entries and a rollup
//! grouped by task and detail with a terminal-friendly bar.

use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;

use crate::{
    ledger::entry::TimeEntry,
    utils::time::{hours_minutes, previous_working_day},
};

/// Task excluded from the rollup and the commitment report.
pub const LUNCH_BREAK_TASK: &str = "Lunch Break";

pub const BAR_MARKER: char = '■';
const MINUTES_PER_MARK: u32 = 15;

/// Entries recorded on the most recent working day before `today`,
/// ordered by timestamp descending.
pub fn yesterday_entries<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    today: NaiveDate,
) -> Vec<TimeEntry> {
    let target = previous_working_day(today);
    let mut found = entries
        .into_iter()
        .filter(|v| v.day() == target)
        .cloned()
        .collect::<Vec<_>>();
    found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    found
}

/// One rollup row. The trailing summary row has no task or detail and
/// carries the grand total as `time_text` instead of a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupRow {
    pub task: Option<Arc<str>>,
    pub detail: Option<Arc<str>>,
    pub minutes: u32,
    pub bar: String,
    pub time_text: Option<String>,
}

/// Groups yesterday's entries by `(task, detail)`, skipping lunch breaks,
/// and appends a grand-total summary row. Rows are ordered task then
/// detail, with the summary row last.
pub fn yesterday_rollup<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    today: NaiveDate,
) -> Vec<RollupRow> {
    let mut grouped = BTreeMap::<(Arc<str>, Arc<str>), u32>::new();
    for entry in yesterday_entries(entries, today) {
        if &*entry.task == LUNCH_BREAK_TASK {
            continue;
        }
        *grouped
            .entry((entry.task.clone(), entry.detail.clone()))
            .or_default() += entry.duration_minutes;
    }

    let total: u32 = grouped.values().sum();

    let mut rows = grouped
        .into_iter()
        .map(|((task, detail), minutes)| RollupRow {
            task: Some(task),
            detail: Some(detail),
            minutes,
            bar: String::from(BAR_MARKER).repeat((minutes / MINUTES_PER_MARK) as usize),
            time_text: None,
        })
        .collect::<Vec<_>>();

    rows.push(RollupRow {
        task: None,
        detail: None,
        minutes: total,
        bar: String::new(),
        time_text: Some(hours_minutes(total)),
    });
    rows
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

    use crate::ledger::entry::TimeEntry;

    use super::{yesterday_entries, yesterday_rollup, LUNCH_BREAK_TASK};

    // 2024-04-05 is a Friday
    const FRIDAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

    fn entry(date: NaiveDate, hour: u32, task: &str, detail: &str, minutes: i64) -> TimeEntry {
        let at = Utc.from_utc_datetime(&NaiveDateTime::new(
            date,
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        ));
        TimeEntry::new(at, task, detail, minutes).unwrap()
    }

    #[test]
    fn monday_looks_back_to_friday() {
        let monday = FRIDAY + Duration::days(3);
        let entries = [
            entry(FRIDAY, 9, "Admin", "emails", 30),
            entry(FRIDAY, 10, "Project A", "design", 60),
            entry(monday, 9, "Admin", "standup", 15),
        ];

        let found = yesterday_entries(&entries, monday);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|v| v.day() == FRIDAY));
    }

    #[test]
    fn midweek_looks_back_one_day_ordered_descending() {
        let thursday = FRIDAY - Duration::days(1);
        let entries = [
            entry(thursday, 9, "Admin", "", 30),
            entry(thursday, 11, "Project A", "", 60),
            entry(thursday, 10, "Project B", "", 15),
            entry(FRIDAY, 9, "Admin", "", 15),
        ];

        let found = yesterday_entries(&entries, FRIDAY);
        let tasks = found.iter().map(|v| v.task.to_string()).collect::<Vec<_>>();
        assert_eq!(tasks, vec!["Project A", "Project B", "Admin"]);
    }

    #[test]
    fn rollup_excludes_lunch_and_sums_by_task_and_detail() {
        let thursday = FRIDAY - Duration::days(1);
        let entries = [
            entry(thursday, 9, "Admin", "emails", 30),
            entry(thursday, 10, "Admin", "emails", 30),
            entry(thursday, 11, "Admin", "filing", 15),
            entry(thursday, 12, LUNCH_BREAK_TASK, "", 60),
            entry(thursday, 13, "Project A", "design", 50),
        ];

        let rows = yesterday_rollup(&entries, FRIDAY);
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].task.as_deref(), Some("Admin"));
        assert_eq!(rows[0].detail.as_deref(), Some("emails"));
        assert_eq!(rows[0].minutes, 60);
        assert_eq!(rows[0].bar.chars().count(), 4);

        assert_eq!(rows[1].detail.as_deref(), Some("filing"));
        assert_eq!(rows[1].bar.chars().count(), 1);

        assert_eq!(rows[2].task.as_deref(), Some("Project A"));
        assert_eq!(rows[2].bar.chars().count(), 3);

        // trailing summary row: 60 + 15 + 50 = 125 minutes
        let summary = &rows[3];
        assert_eq!(summary.task, None);
        assert_eq!(summary.detail, None);
        assert_eq!(summary.minutes, 125);
        assert_eq!(summary.time_text.as_deref(), Some("2 hours 5 minutes"));
        assert!(summary.bar.is_empty());
    }

    #[test]
    fn rollup_of_empty_day_is_a_zero_summary() {
        let rows = yesterday_rollup(&[], FRIDAY);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].minutes, 0);
        assert_eq!(rows[0].time_text.as_deref(), Some("0 hours 0 minutes"));
    }
}
