//! Ledger of discrete time-tracking entries with derived reporting
//! views: latest detail per task, daily/weekly summaries with top-task
//! bucketing, a previous-working-day snapshot, and a rolling six-month
//! commitment report.
//!

pub mod cli;
pub mod config;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;
