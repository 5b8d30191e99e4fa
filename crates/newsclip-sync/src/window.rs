//! Sync window calculation
//!
//! A run selects rows from a rolling 24-hour span aligned to a fixed daily
//! cutoff: 15:00:00 of the previous calendar day through 14:59:59 of the run
//! day, both in UTC+9. The destination bucket is named after the run date.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone};

/// Format of the destination bucket name, e.g. "240315" for 2024-03-15.
pub const BUCKET_ID_FORMAT: &str = "%y%m%d";

/// The time span and destination bucket for one sync run.
///
/// Pure function of the run instant; both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncWindow {
    /// Inclusive lower bound: previous day at 15:00:00
    pub start: DateTime<FixedOffset>,
    /// Inclusive upper bound: run day at 14:59:59
    pub end: DateTime<FixedOffset>,
    /// Destination bucket name, six-digit date code of the run day
    pub bucket_id: String,
}

impl SyncWindow {
    /// Compute the window for the given run instant.
    pub fn compute(now: DateTime<FixedOffset>) -> Self {
        let offset = *now.offset();
        let today = now.date_naive();

        let end = at_time(today, 14, 59, 59, offset);
        let start = at_time(today - Days::new(1), 15, 0, 0, offset);
        let bucket_id = now.format(BUCKET_ID_FORMAT).to_string();

        Self {
            start,
            end,
            bucket_id,
        }
    }

    /// Whether an instant falls inside the window. Both bounds inclusive.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn at_time(date: NaiveDate, hour: u32, min: u32, sec: u32, offset: FixedOffset) -> DateTime<FixedOffset> {
    let naive = date
        .and_hms_opt(hour, min, sec)
        .expect("valid wall-clock time");
    offset
        .from_local_datetime(&naive)
        .single()
        .expect("fixed offset")
}
