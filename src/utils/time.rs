use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc, Weekday};
use now::DateTimeNow;

/// Returns the Monday on or before the given date (ISO week boundary).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_monday() as u64)
}

/// Week boundary of the week containing the given instant.
pub fn week_start_of(moment: DateTime<Utc>) -> NaiveDate {
    moment.beginning_of_week().date_naive()
}

/// The most recent working day strictly before `today`. On Mondays this
/// skips back over the weekend to Friday.
pub fn previous_working_day(today: NaiveDate) -> NaiveDate {
    if today.weekday() == Weekday::Mon {
        today - Duration::days(3)
    } else {
        today - Duration::days(1)
    }
}

/// "2 hours 5 minutes" style text used by the yesterday rollup.
pub fn hours_minutes(total_minutes: u32) -> String {
    format!("{} hours {} minutes", total_minutes / 60, total_minutes % 60)
}

/// "2 hours, 5 minutes" style text used by the commitment report.
pub fn hours_comma_minutes(total_minutes: u32) -> String {
    format!("{} hours, {} minutes", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

    use super::{
        hours_comma_minutes, hours_minutes, previous_working_day, week_start, week_start_of,
    };

    #[test]
    fn week_start_is_monday_on_or_before() {
        // 2024-04-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(week_start(monday), monday);
        for offset in 1..7u64 {
            let date = monday + chrono::Days::new(offset);
            assert_eq!(week_start(date), monday, "{date}");
        }
        let next_monday = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        assert_eq!(week_start(next_monday), next_monday);
    }

    #[test]
    fn week_start_of_instant_matches_date_version() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        let moment = Utc.from_utc_datetime(&NaiveDateTime::new(
            date,
            NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
        ));
        assert_eq!(week_start_of(moment), week_start(date));
    }

    #[test]
    fn previous_working_day_skips_weekend() {
        let monday = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        let friday = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        assert_eq!(previous_working_day(monday), friday);

        let tuesday = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();
        assert_eq!(previous_working_day(tuesday), monday);
    }

    #[test]
    fn duration_text() {
        assert_eq!(hours_minutes(125), "2 hours 5 minutes");
        assert_eq!(hours_minutes(0), "0 hours 0 minutes");
        assert_eq!(hours_comma_minutes(4000), "66 hours, 40 minutes");
    }
}
