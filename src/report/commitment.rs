//! Rolling six-month commitment report: a synthetic weekly axis joined
//! against actual totals, with a two-week trailing sum compared to a
//! fixed fortnightly target.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

use crate::{
    ledger::entry::TimeEntry,
    report::yesterday::LUNCH_BREAK_TASK,
    utils::time::{hours_comma_minutes, week_start},
};

/// 37 hours a week over a fortnight, in minutes.
pub const DEFAULT_FORTNIGHT_COMMITMENT_MINUTES: u32 = 37 * 2 * 60;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CommitmentError {
    #[error("invalid configuration: fortnightly commitment must be a positive number of minutes")]
    InvalidConfiguration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentWeek {
    pub week_start: NaiveDate,
    pub total_interval: u32,
    pub time_working: String,
    pub fortnightly_total: u32,
    pub proportion_of_commitment: f64,
}

/// Weekly axis points from the Monday on/before six months ago up to and
/// including the Monday on/before a week ago. The current in-progress
/// week is always excluded. Weeks with no recorded time still appear with
/// a zero total. Output is ordered most recent week first.
pub fn commitment_report<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
    today: NaiveDate,
    fortnight_commitment_minutes: u32,
) -> Result<Vec<CommitmentWeek>, CommitmentError> {
    if fortnight_commitment_minutes == 0 {
        return Err(CommitmentError::InvalidConfiguration);
    }

    let from_date = week_start(
        today
            .checked_sub_months(Months::new(6))
            .expect("six months back stays in range"),
    );
    let cutoff = week_start(today - Duration::days(7));
    let from_moment = start_of_day(from_date);

    let mut totals = HashMap::<NaiveDate, u32>::new();
    for entry in entries {
        if entry.timestamp <= from_moment || &*entry.task == LUNCH_BREAK_TASK {
            continue;
        }
        *totals.entry(week_start(entry.day())).or_default() += entry.duration_minutes;
    }

    let mut rows = Vec::new();
    let mut previous_total = 0u32;
    let mut week = from_date;
    while week <= cutoff {
        let total = totals.get(&week).copied().unwrap_or(0);
        // trailing window over this week and the one directly before it;
        // the first axis week sums against nothing
        let fortnightly_total = total + previous_total;
        let proportion = 100.0 * fortnightly_total as f64 / fortnight_commitment_minutes as f64;
        rows.push(CommitmentWeek {
            week_start: week,
            total_interval: total,
            time_working: hours_comma_minutes(total),
            fortnightly_total,
            proportion_of_commitment: (proportion * 100.0).round() / 100.0,
        });
        previous_total = total;
        week += Duration::days(7);
    }

    rows.reverse();
    Ok(rows)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&NaiveDateTime::new(date, NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

    use crate::{
        ledger::entry::TimeEntry,
        report::yesterday::LUNCH_BREAK_TASK,
        utils::time::week_start,
    };

    use super::{commitment_report, CommitmentError, DEFAULT_FORTNIGHT_COMMITMENT_MINUTES};

    // 2024-04-15 is a Monday
    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();

    fn entry(date: NaiveDate, hour: u32, task: &str, minutes: i64) -> TimeEntry {
        let at = Utc.from_utc_datetime(&NaiveDateTime::new(
            date,
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        ));
        TimeEntry::new(at, task, "", minutes).unwrap()
    }

    #[test]
    fn commitment_constant_is_4440_minutes() {
        assert_eq!(DEFAULT_FORTNIGHT_COMMITMENT_MINUTES, 4440);
    }

    #[test]
    fn zero_commitment_fails_fast() {
        assert_eq!(
            commitment_report(&[], TODAY, 0),
            Err(CommitmentError::InvalidConfiguration)
        );
    }

    #[test]
    fn axis_spans_six_months_and_excludes_current_week() {
        let rows = commitment_report(&[], TODAY, DEFAULT_FORTNIGHT_COMMITMENT_MINUTES).unwrap();

        // 2023-10-15 backs up to Monday 2023-10-09; last axis week is
        // Monday 2024-04-08, one week before today's week
        let first = rows.last().unwrap();
        let last = rows.first().unwrap();
        assert_eq!(first.week_start, NaiveDate::from_ymd_opt(2023, 10, 9).unwrap());
        assert_eq!(last.week_start, NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        assert_eq!(rows.len(), 27);

        // every week is present even with no entries at all
        assert!(rows.iter().all(|v| v.total_interval == 0));
        assert!(rows.iter().all(|v| v.time_working == "0 hours, 0 minutes"));

        // descending by week_start
        assert!(rows.windows(2).all(|w| w[0].week_start > w[1].week_start));
    }

    #[test]
    fn rolling_fortnight_example() {
        // two trailing axis weeks carrying 4000 and 4500 minutes
        let last_week = week_start(TODAY - Duration::days(7));
        let week_before = last_week - Duration::days(7);

        let mut entries = Vec::new();
        for i in 0..4 {
            entries.push(entry(week_before + Duration::days(i), 9, "Work", 1000));
        }
        for i in 0..4 {
            entries.push(entry(last_week + Duration::days(i), 9, "Work", 1125));
        }

        let rows =
            commitment_report(&entries, TODAY, DEFAULT_FORTNIGHT_COMMITMENT_MINUTES).unwrap();

        let newest = &rows[0];
        let older = &rows[1];
        assert_eq!(older.total_interval, 4000);
        assert_eq!(older.fortnightly_total, 4000);
        assert_eq!(older.proportion_of_commitment, 90.09);

        assert_eq!(newest.total_interval, 4500);
        assert_eq!(newest.fortnightly_total, 8500);
        assert_eq!(newest.proportion_of_commitment, 191.44);
    }

    #[test]
    fn lunch_breaks_and_pre_window_entries_are_excluded() {
        let last_week = week_start(TODAY - Duration::days(7));

        let entries = [
            entry(last_week, 9, "Work", 100),
            entry(last_week, 12, LUNCH_BREAK_TASK, 60),
            // before the six month window entirely
            entry(TODAY - Duration::days(300), 9, "Work", 500),
        ];

        let rows =
            commitment_report(&entries, TODAY, DEFAULT_FORTNIGHT_COMMITMENT_MINUTES).unwrap();
        let newest = &rows[0];
        assert_eq!(newest.total_interval, 100);
        assert_eq!(rows.iter().map(|v| v.total_interval).sum::<u32>(), 100);
    }

    #[test]
    fn first_axis_week_fortnight_equals_itself() {
        let first_week = week_start(
            TODAY
                .checked_sub_months(chrono::Months::new(6))
                .unwrap(),
        );
        let entries = [entry(first_week + Duration::days(1), 9, "Work", 240)];

        let rows =
            commitment_report(&entries, TODAY, DEFAULT_FORTNIGHT_COMMITMENT_MINUTES).unwrap();
        let first = rows.last().unwrap();
        assert_eq!(first.total_interval, 240);
        assert_eq!(first.fortnightly_total, 240);

        // the following week rolls it forward once, then it drops out
        let second = &rows[rows.len() - 2];
        assert_eq!(second.fortnightly_total, 240);
        let third = &rows[rows.len() - 3];
        assert_eq!(third.fortnightly_total, 0);
    }

    #[test]
    fn time_working_text_uses_comma_format() {
        let last_week = week_start(TODAY - Duration::days(7));
        let entries = [entry(last_week, 9, "Work", 125)];
        let rows =
            commitment_report(&entries, TODAY, DEFAULT_FORTNIGHT_COMMITMENT_MINUTES).unwrap();
        assert_eq!(rows[0].time_working, "2 hours, 5 minutes");
    }
}
