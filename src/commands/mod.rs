//! CLI command implementations.
//!
//! Available commands:
//! - **metrics**: Aggregate raw records into a dated snapshot artifact
//! - **analytics**: Turn the latest (or a chosen) artifact into a view model
//! - **init**: Write a default configuration file
//!
//! Commands are the only layer that writes to stdout.

pub mod analytics;
pub mod init;
pub mod metrics;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Midnight UTC of `as_of`, or the current time.
pub fn reference_time(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    match as_of {
        Some(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        None => Utc::now(),
    }
}
