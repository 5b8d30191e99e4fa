//! Sync pipeline
//!
//! Drives one run end to end: ensure the destination bucket exists, recover
//! dedup state, load the source sheet, filter, materialize, and append. The
//! flow is strictly linear with no retries; any backend failure before the
//! final writes aborts the run with nothing persisted. Storage calls are
//! awaited one at a time.

use chrono::{DateTime, Datelike, FixedOffset};
use newsclip_common::{NewsclipError, Result};
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::dedup::DedupState;
use crate::materialize::{header_row, materialize};
use crate::record::{SkipReason, SourceRecord};
use crate::storage::RangeStore;
use crate::timestamp::jst;
use crate::window::SyncWindow;

/// Outcome counters for one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Destination bucket the run targeted
    pub bucket_id: String,
    /// Source rows examined (header excluded)
    pub scanned: usize,
    /// Rows appended to the destination
    pub appended: usize,
    /// Rows skipped: wrong cell count
    pub skipped_shape: usize,
    /// Rows skipped: unparseable posted-at
    pub skipped_timestamp: usize,
    /// Rows rejected: posted outside the window
    pub out_of_window: usize,
    /// Rows rejected: URL already in the destination
    pub duplicates: usize,
    /// Whether this run wrote the destination header
    pub header_written: bool,
}

/// Linear sync orchestrator over a pair of range stores.
///
/// Source and destination may be the same store; the pipeline only ever
/// reads the source and only ever appends to the destination.
pub struct SyncPipeline<S: RangeStore> {
    source: S,
    destination: S,
    config: SyncConfig,
}

impl<S: RangeStore> SyncPipeline<S> {
    pub fn new(source: S, destination: S, config: SyncConfig) -> Self {
        Self {
            source,
            destination,
            config,
        }
    }

    /// Run one sync for the given instant.
    ///
    /// The instant is injectable so the whole pipeline is a pure function of
    /// (now, source rows, destination rows). It is normalized to UTC+9
    /// before the window and the year inference use it.
    pub async fn run(&self, now: DateTime<FixedOffset>) -> Result<SyncReport> {
        let now = now.with_timezone(&jst());
        let window = SyncWindow::compute(now);

        info!(
            bucket = %window.bucket_id,
            start = %window.start.format("%Y/%m/%d %H:%M:%S"),
            end = %window.end.format("%Y/%m/%d %H:%M:%S"),
            "starting sync run"
        );

        let mut report = SyncReport {
            bucket_id: window.bucket_id.clone(),
            ..SyncReport::default()
        };

        // ENSURE_BUCKET
        let buckets = self
            .destination
            .list_sheets()
            .await
            .map_err(|e| NewsclipError::bucket_access(&window.bucket_id, e))?;
        if !buckets.iter().any(|b| b == &window.bucket_id) {
            info!(bucket = %window.bucket_id, "creating destination bucket");
            self.destination
                .create_sheet(&window.bucket_id)
                .await
                .map_err(|e| NewsclipError::bucket_access(&window.bucket_id, e))?;
        }

        // LOAD_DEDUP_STATE
        let existing = self
            .destination
            .get_range(&window.bucket_id, &self.config.destination_columns)
            .await
            .map_err(|e| NewsclipError::bucket_access(&window.bucket_id, e))?;
        let dedup = DedupState::from_rows(&existing);
        info!(
            existing = dedup.len(),
            header_present = dedup.header_present,
            "recovered destination state"
        );

        // LOAD_SOURCE
        let source_rows = self
            .source
            .get_range(&self.config.source_sheet, &self.config.source_columns)
            .await
            .map_err(|e| NewsclipError::source_unavailable(&self.config.source_sheet, e))?;
        if source_rows.is_empty() {
            return Err(NewsclipError::SourceEmpty(self.config.source_sheet.clone()));
        }
        info!(
            rows = source_rows.len().saturating_sub(1),
            sheet = %self.config.source_sheet,
            "loaded source rows (header excluded)"
        );

        // FILTER
        let accepted = self.filter(&source_rows, &window, &dedup, now.year(), &mut report);
        if accepted.is_empty() {
            info!(bucket = %report.bucket_id, "no new records in the window; nothing to write");
            return Ok(report);
        }

        // MATERIALIZE
        let rows = materialize(&accepted, &self.config.source_sheet);

        // WRITE_HEADER
        if !dedup.header_present {
            self.destination
                .append_rows(&window.bucket_id, "A1", vec![header_row()])
                .await
                .map_err(|e| NewsclipError::bucket_access(&window.bucket_id, e))?;
            report.header_written = true;
            info!(bucket = %window.bucket_id, "wrote destination header");
        }

        // WRITE_ROWS
        report.appended = rows.len();
        self.destination
            .append_rows(&window.bucket_id, &self.config.destination_columns, rows)
            .await
            .map_err(|e| NewsclipError::bucket_access(&window.bucket_id, e))?;

        info!(
            bucket = %report.bucket_id,
            appended = report.appended,
            duplicates = report.duplicates,
            out_of_window = report.out_of_window,
            "sync run complete"
        );

        Ok(report)
    }

    /// Select the source rows to carry over, in source order. Row 0 is the
    /// source header and is always skipped.
    fn filter(
        &self,
        source_rows: &[Vec<String>],
        window: &SyncWindow,
        dedup: &DedupState,
        current_year: i32,
        report: &mut SyncReport,
    ) -> Vec<SourceRecord> {
        let mut accepted = Vec::new();

        for (index, row) in source_rows.iter().enumerate().skip(1) {
            report.scanned += 1;

            let record = match SourceRecord::decode(row, current_year, jst()) {
                Ok(record) => record,
                Err(reason) => {
                    warn!(row = index + 1, %reason, "skipping source row");
                    match reason {
                        SkipReason::WrongShape { .. } => report.skipped_shape += 1,
                        SkipReason::BadTimestamp { .. } => report.skipped_timestamp += 1,
                        _ => {},
                    }
                    continue;
                },
            };

            if !window.contains(record.posted_at) {
                debug!(row = index + 1, posted_at = %record.posted_at, "outside window");
                report.out_of_window += 1;
                continue;
            }
            if dedup.contains(&record.url) {
                debug!(row = index + 1, url = %record.url, "already transferred");
                report.duplicates += 1;
                continue;
            }

            accepted.push(record);
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults_to_zero_counters() {
        let report = SyncReport::default();
        assert_eq!(report.scanned, 0);
        assert_eq!(report.appended, 0);
        assert!(!report.header_written);
    }
}
