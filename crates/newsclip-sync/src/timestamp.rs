//! Posted-at timestamp parsing
//!
//! Source rows carry one of two textual encodings: a year-less short form
//! (`MM/DD HH:MM`) used for items presumed to be from the current year, and
//! a fully qualified form (`YYYY/MM/DD HH:MM:SS`). Formats are tried in
//! priority order from an explicit table; the first success wins and any
//! string matching neither yields `None` so the caller can skip the record.
//!
//! The short form inherits its year from the run context, not the record.
//! Near year boundaries this misattributes December items processed in
//! January; that inference rule is intentional and matches the upstream
//! feed's behavior.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// All posted-at instants carry this fixed offset.
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

/// The fixed UTC+9 offset used throughout the pipeline.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("+09:00 is a valid offset")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StampFormat {
    /// `MM/DD HH:MM`; the year is supplied from the run context
    ShortNoYear,
    /// `YYYY/MM/DD HH:MM:SS`
    Full,
}

/// Known encodings, tried in priority order.
const FORMATS: &[(StampFormat, &str)] = &[
    (StampFormat::ShortNoYear, "%m/%d %H:%M"),
    (StampFormat::Full, "%Y/%m/%d %H:%M:%S"),
];

/// Parse a raw posted-at string into an instant with the given fixed offset.
///
/// Returns `None` when the string matches none of the known encodings; this
/// is a per-record condition, not a fatal error.
pub fn parse_posted_at(
    raw: &str,
    current_year: i32,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    for (kind, pattern) in FORMATS {
        if let Some(naive) = try_format(raw, *kind, pattern, current_year) {
            return naive.and_local_timezone(offset).single();
        }
    }
    None
}

fn try_format(
    raw: &str,
    kind: StampFormat,
    pattern: &str,
    current_year: i32,
) -> Option<NaiveDateTime> {
    match kind {
        StampFormat::ShortNoYear => {
            let mut parsed = Parsed::new();
            parse(&mut parsed, raw, StrftimeItems::new(pattern)).ok()?;
            parsed.set_year(i64::from(current_year)).ok()?;
            let date = parsed.to_naive_date().ok()?;
            let time = parsed.to_naive_time().ok()?;
            Some(NaiveDateTime::new(date, time))
        },
        StampFormat::Full => NaiveDateTime::parse_from_str(raw, pattern).ok(),
    }
}
