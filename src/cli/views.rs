//! Terminal rendering for the read-side views.

use ansi_term::Style;
use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::{
    ledger::{entry::LatestDetail, far_future, Ledger},
    report::{
        commitment::CommitmentWeek,
        summary::{bucket_weekly, daily_totals, DailyTotal},
        yesterday::{yesterday_entries, yesterday_rollup},
    },
    utils::time::previous_working_day,
};

pub fn print_summary(ledger: &Ledger) {
    let bucketed = bucket_weekly(&daily_totals(ledger.all_entries()));
    if bucketed.is_empty() {
        println!("No entries recorded yet");
        return;
    }

    let mut current_week: Option<NaiveDate> = None;
    for DailyTotal {
        week_start,
        day,
        task,
        total_minutes,
    } in bucketed
    {
        if current_week != Some(week_start) {
            println!(
                "{}",
                Style::new()
                    .bold()
                    .paint(format!("Week of {week_start}"))
            );
            current_week = Some(week_start);
        }
        println!(
            "  {}\t{}\t{}",
            day.format("%a %x"),
            format_minutes(total_minutes),
            task
        );
    }
}

pub fn print_yesterday(ledger: &Ledger, today: NaiveDate) {
    let target = previous_working_day(today);
    let entries = yesterday_entries(ledger.all_entries(), today);
    println!(
        "{}",
        Style::new().bold().paint(format!("Entries for {target}"))
    );
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in &entries {
        println!(
            "  {}\t{}\t{}\t{}",
            format_time(entry.timestamp),
            format_minutes(entry.duration_minutes),
            entry.task,
            entry.detail
        );
    }

    println!();
    println!("{}", Style::new().bold().paint("Rollup"));
    for row in yesterday_rollup(ledger.all_entries(), today) {
        match (&row.task, &row.time_text) {
            (Some(task), _) => println!(
                "  {}\t{}\t{}  {}",
                task,
                row.detail.as_deref().unwrap_or(""),
                format_minutes(row.minutes),
                Style::new().dimmed().paint(row.bar)
            ),
            (None, Some(text)) => println!("  Total\t{text}"),
            (None, None) => {}
        }
    }
}

pub fn print_commitment(rows: &[CommitmentWeek]) {
    if rows.is_empty() {
        println!("Not enough history for a commitment report yet");
        return;
    }
    println!(
        "{}",
        Style::new()
            .bold()
            .paint("Week\t\tWorked\t\t\tFortnight\tOf commitment")
    );
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}%",
            row.week_start,
            row.time_working,
            format_minutes(row.fortnightly_total),
            row.proportion_of_commitment
        );
    }
}

pub fn print_task_list(
    last: Option<(&str, &str)>,
    rows: &[LatestDetail],
) {
    if let Some((task, detail)) = last {
        println!(
            "{} {task}\t{detail}",
            Style::new().bold().paint("Current:")
        );
        println!();
    }
    for row in rows {
        let seen = if row.last_timestamp == far_future() {
            "never".to_string()
        } else {
            format_time(row.last_timestamp)
        };
        println!("{}\t{}\t{}", row.task, row.detail, seen);
    }
}

fn format_minutes(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{}h{}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes % 60)
    }
}

fn format_time(moment: DateTime<Utc>) -> String {
    moment
        .with_timezone(&Local)
        .format("%x %H:%M")
        .to_string()
}

/// Minimal CSV field quoting for the export command.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
