//! Daily totals and the top-7 + "Others" weekly bucketing.
//!
//! The bucketing decision is made at week granularity but the output is
//! reported per day, so this runs in two passes: rank tasks inside each
//! week, then re-group the daily rows under the effective labels.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use chrono::NaiveDate;

use crate::{ledger::entry::TimeEntry, utils::time::week_start_of};

pub const OTHERS_LABEL: &str = "Others";

/// Tasks per week that keep their own label; everything ranked below
/// merges into [OTHERS_LABEL].
pub const TOP_TASKS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    pub week_start: NaiveDate,
    pub day: NaiveDate,
    pub task: Arc<str>,
    pub total_minutes: u32,
}

/// Sums entry durations by `(week_start, day, task)`, ordered by that key.
pub fn daily_totals<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Vec<DailyTotal> {
    let mut totals = BTreeMap::<(NaiveDate, NaiveDate, Arc<str>), u32>::new();
    for entry in entries {
        let key = (week_start_of(entry.timestamp), entry.day(), entry.task.clone());
        *totals.entry(key).or_default() += entry.duration_minutes;
    }
    totals
        .into_iter()
        .map(|((week_start, day, task), total_minutes)| DailyTotal {
            week_start,
            day,
            task,
            total_minutes,
        })
        .collect()
}

fn weekly_totals(daily: &[DailyTotal]) -> BTreeMap<NaiveDate, Vec<(Arc<str>, u32)>> {
    let mut totals = BTreeMap::<(NaiveDate, Arc<str>), u32>::new();
    for row in daily {
        *totals
            .entry((row.week_start, row.task.clone()))
            .or_default() += row.total_minutes;
    }

    let mut weeks = BTreeMap::<NaiveDate, Vec<(Arc<str>, u32)>>::new();
    for ((week, task), minutes) in totals {
        weeks.entry(week).or_default().push((task, minutes));
    }
    weeks
}

/// Re-labels daily totals so that within each week only the
/// [TOP_TASKS_PER_WEEK] tasks by weekly minutes keep their name. Ties are
/// broken by task name ascending. Bucketed tasks falling on the same day
/// merge into a single "Others" row.
pub fn bucket_weekly(daily: &[DailyTotal]) -> Vec<DailyTotal> {
    let mut named = HashSet::<(NaiveDate, Arc<str>)>::new();
    for (week, mut tasks) in weekly_totals(daily) {
        tasks.sort_by(|a, b| Reverse(a.1).cmp(&Reverse(b.1)).then_with(|| a.0.cmp(&b.0)));
        for (task, _) in tasks.into_iter().take(TOP_TASKS_PER_WEEK) {
            named.insert((week, task));
        }
    }

    let mut merged = BTreeMap::<(NaiveDate, NaiveDate, Arc<str>), u32>::new();
    for row in daily {
        let label = if named.contains(&(row.week_start, row.task.clone())) {
            row.task.clone()
        } else {
            OTHERS_LABEL.into()
        };
        *merged
            .entry((row.week_start, row.day, label))
            .or_default() += row.total_minutes;
    }

    merged
        .into_iter()
        .map(|((week_start, day, task), total_minutes)| DailyTotal {
            week_start,
            day,
            task,
            total_minutes,
        })
        .collect()
}
