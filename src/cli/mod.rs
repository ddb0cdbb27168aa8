pub mod views;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Duration, Local, Utc};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    config::WorklogConfig,
    ledger::entry::TimeEntry,
    report::commitment::commitment_report,
    storage::LedgerFile,
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::enable_logging,
    },
};

use views::{csv_field, print_commitment, print_summary, print_task_list, print_yesterday};

#[derive(Parser, Debug)]
#[command(name = "Worklog", version)]
#[command(about = "Ledger of what you were working on, with daily, weekly and commitment reports", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Record what you were working on")]
    Add {
        task: String,
        #[arg(short, long, default_value = "")]
        detail: String,
        #[arg(
            short,
            long,
            help = "Minutes the interval lasted. Defaults to the configured granularity"
        )]
        minutes: Option<i64>,
        #[arg(
            long,
            help = "When the interval ended. Examples are \"now\", \"1 hour ago\", \"12:00 16/03/2025\""
        )]
        at: Option<String>,
    },
    #[command(about = "Overwrite an existing entry")]
    Edit {
        #[arg(help = "Timestamp of the entry to change, e.g. \"12:00 16/03/2025\"")]
        at: String,
        task: String,
        #[arg(short, long, default_value = "")]
        detail: String,
        #[arg(short, long)]
        minutes: i64,
    },
    #[command(about = "List tasks for the drop-down, defaults first")]
    Tasks,
    #[command(about = "Daily breakdown per week, top tasks plus Others")]
    Summary,
    #[command(about = "What happened on the previous working day")]
    Yesterday,
    #[command(about = "Rolling six month report against the fortnightly commitment")]
    Report,
    #[command(about = "Dump the ledger as CSV")]
    Export {
        #[arg(short, long, help = "Limit to the last N days")]
        days: Option<i64>,
        #[arg(short, long, help = "Output file. Defaults to stdout")]
        out: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let application_path = match &args.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&application_path, logging_level, args.log)?;

    let config = WorklogConfig::load(&application_path.join("config.json"))?;
    let storage = LedgerFile::new(&application_path)?;
    let mut ledger = storage.load().await?;
    let clock = DefaultClock;
    let now = clock.time();
    let today = now.with_timezone(&Local).date_naive();

    match args.commands {
        Commands::Add {
            task,
            detail,
            minutes,
            at,
        } => {
            let at = match at {
                Some(s) => parse_cli_date(&s)?,
                None => now,
            };
            let minutes = minutes.unwrap_or(config.interval_minutes as i64);
            let entry = TimeEntry::new(at, &task, &detail, minutes)?;
            ledger.append(entry)?;
            storage.save(&ledger).await?;
            debug!("Recorded {task} at {at}");
        }
        Commands::Edit {
            at,
            task,
            detail,
            minutes,
        } => {
            let at = parse_cli_date(&at)?;
            ledger.update(at, &task, &detail, minutes)?;
            storage.save(&ledger).await?;
        }
        Commands::Tasks => {
            let rows =
                ledger.task_detail_with_defaults(&config.default_tasks, now, config.lookback_weeks);
            let last = ledger
                .last_task_and_detail(now)
                .map(|v| (&*v.task, &*v.detail));
            print_task_list(last, &rows);
        }
        Commands::Summary => print_summary(&ledger),
        Commands::Yesterday => print_yesterday(&ledger, today),
        Commands::Report => {
            let rows = commitment_report(
                ledger.all_entries(),
                today,
                config.fortnight_commitment_minutes,
            )?;
            print_commitment(&rows);
        }
        Commands::Export { days, out } => {
            let mut output = String::from("date_time,task,detail,interval\n");
            let cutoff = days.map(|d| today - Duration::days(d));
            for entry in ledger.all_entries() {
                if let Some(cutoff) = cutoff {
                    if entry.day() < cutoff {
                        continue;
                    }
                }
                output.push_str(&format!(
                    "{},{},{},{}\n",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    csv_field(&entry.task),
                    csv_field(&entry.detail),
                    entry.duration_minutes
                ));
            }
            match out {
                Some(path) => std::fs::write(path, output)?,
                None => print!("{output}"),
            }
        }
    }
    Ok(())
}

/// Parses free-form dates the way the rest of the interface does, turning
/// failures into a proper usage error.
fn parse_cli_date(value: &str) -> Result<DateTime<Utc>> {
    match parse_date_string(value, Local::now(), chrono_english::Dialect::Uk) {
        Ok(v) => Ok(v.with_timezone(&Utc)),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {value}: {e}"),
            )
            .into()),
    }
}
