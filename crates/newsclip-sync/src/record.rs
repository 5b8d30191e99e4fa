//! Source row decoding
//!
//! Source rows are expected to be 4-tuples of (title, url, posted-at,
//! source). Rows that do not decode are tagged with a [`SkipReason`] and
//! reported as warnings; they never abort a run.

use chrono::{DateTime, FixedOffset};

use crate::timestamp::parse_posted_at;

/// One news item decoded from a source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub title: String,
    pub url: String,
    pub posted_at: DateTime<FixedOffset>,
    pub source: String,
}

/// Why a source row was not carried into the destination.
///
/// The first two variants are produced while decoding; the filter step adds
/// the last two. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Row arity does not match the expected 4-tuple
    WrongShape { expected: usize, got: usize },
    /// Posted-at string matches neither known encoding
    BadTimestamp { raw: String },
    /// Posted-at instant falls outside the sync window
    OutOfWindow,
    /// URL already present in the destination bucket
    Duplicate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::WrongShape { expected, got } => {
                write!(f, "expected {} cells, got {}", expected, got)
            },
            SkipReason::BadTimestamp { raw } => {
                write!(f, "unparseable posted-at '{}'", raw)
            },
            SkipReason::OutOfWindow => write!(f, "posted outside the sync window"),
            SkipReason::Duplicate => write!(f, "already present in destination"),
        }
    }
}

impl SourceRecord {
    /// Expected cell count of a source row.
    pub const FIELD_COUNT: usize = 4;

    /// Decode a raw source row.
    ///
    /// The year-less posted-at form inherits `current_year`; see the
    /// [`crate::timestamp`] module for the inference rule.
    pub fn decode(
        row: &[String],
        current_year: i32,
        offset: FixedOffset,
    ) -> Result<Self, SkipReason> {
        let [title, url, posted_raw, source] = row else {
            return Err(SkipReason::WrongShape {
                expected: Self::FIELD_COUNT,
                got: row.len(),
            });
        };

        let posted_at = parse_posted_at(posted_raw, current_year, offset).ok_or_else(|| {
            SkipReason::BadTimestamp {
                raw: posted_raw.clone(),
            }
        })?;

        Ok(Self {
            title: title.clone(),
            url: url.clone(),
            posted_at,
            source: source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::jst;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn decodes_a_well_formed_row() {
        let record = SourceRecord::decode(
            &row(&["Headline", "https://example.com/a", "03/15 09:30", "Example Wire"]),
            2024,
            jst(),
        )
        .unwrap();

        assert_eq!(record.title, "Headline");
        assert_eq!(record.url, "https://example.com/a");
        assert_eq!(record.source, "Example Wire");
        assert_eq!(
            record.posted_at,
            chrono::DateTime::parse_from_rfc3339("2024-03-15T09:30:00+09:00").unwrap()
        );
    }

    #[test]
    fn short_rows_are_tagged_not_panicked() {
        let err = SourceRecord::decode(&row(&["Headline", "https://example.com/a"]), 2024, jst())
            .unwrap_err();
        assert_eq!(err, SkipReason::WrongShape { expected: 4, got: 2 });
    }

    #[test]
    fn over_long_rows_are_tagged() {
        let err = SourceRecord::decode(
            &row(&["t", "u", "03/15 09:30", "s", "extra"]),
            2024,
            jst(),
        )
        .unwrap_err();
        assert_eq!(err, SkipReason::WrongShape { expected: 4, got: 5 });
    }

    #[test]
    fn bad_timestamp_is_tagged_with_the_raw_string() {
        let err = SourceRecord::decode(
            &row(&["t", "u", "three days ago", "s"]),
            2024,
            jst(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SkipReason::BadTimestamp {
                raw: "three days ago".to_string()
            }
        );
    }
}
