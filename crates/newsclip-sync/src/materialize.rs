//! Destination row materialization
//!
//! Accepted records become fixed-width 12-cell rows in source order. Columns
//! F through J are left for downstream annotation (comment counts, sentiment,
//! category, paywall flag) and are emitted blank; column K carries a 20-char
//! title excerpt and column L the 1-based sequence within the run's batch.

use crate::record::SourceRecord;

/// Cell count of every destination row, header included.
pub const OUTPUT_WIDTH: usize = 12;

/// Character length of the title excerpt in column K.
pub const TITLE_EXCERPT_CHARS: usize = 20;

/// Fixed destination header, written once per bucket.
pub const DESTINATION_HEADER: [&str; OUTPUT_WIDTH] = [
    "ソース",
    "タイトル",
    "URL",
    "投稿日",
    "引用元",
    "コメント数",
    "ポジネガ",
    "カテゴリー",
    "有料記事",
    "J列",
    "K列",
    "L列",
];

/// The destination header as an owned row.
pub fn header_row() -> Vec<String> {
    DESTINATION_HEADER.iter().map(|s| s.to_string()).collect()
}

/// Shape accepted records into destination rows, preserving input order.
///
/// The sequence column restarts at 1 every run; it is not a running counter
/// across the bucket's history.
pub fn materialize(records: &[SourceRecord], source_label: &str) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| output_row(record, source_label, i + 1))
        .collect()
}

fn output_row(record: &SourceRecord, source_label: &str, sequence: usize) -> Vec<String> {
    vec![
        source_label.to_string(),
        record.title.clone(),
        record.url.clone(),
        record.posted_at.format("%Y/%m/%d").to_string(),
        record.source.clone(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        title_excerpt(&record.title),
        sequence.to_string(),
    ]
}

/// First [`TITLE_EXCERPT_CHARS`] characters of the title. Character
/// truncation, not word-boundary aware; short titles pass through unchanged.
fn title_excerpt(title: &str) -> String {
    title.chars().take(TITLE_EXCERPT_CHARS).collect()
}
