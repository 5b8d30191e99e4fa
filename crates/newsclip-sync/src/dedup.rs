//! Deduplication state recovered from prior destination output
//!
//! The destination bucket is read once per run. Its first row, when it
//! starts with the header sentinel, marks the bucket as initialized; every
//! later row contributes its URL cell to the seen set. A bucket without the
//! sentinel is treated as holding no prior valid data.
//!
//! Duplicate URLs *within* one source batch are not deduplicated against
//! each other, only against prior destination state.

use std::collections::HashSet;

/// First cell of the destination header; its presence marks an initialized
/// bucket.
pub const HEADER_SENTINEL: &str = "ソース";

/// Zero-based index of the URL cell in destination rows.
pub const URL_COLUMN: usize = 2;

/// Seen-URL set and header presence for one destination bucket.
#[derive(Debug, Clone, Default)]
pub struct DedupState {
    pub seen_urls: HashSet<String>,
    pub header_present: bool,
}

impl DedupState {
    /// Build dedup state from the destination bucket's raw rows.
    ///
    /// Rows may be ragged; cells past the end of a short row are treated as
    /// empty.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let header_present = rows
            .first()
            .and_then(|row| row.first())
            .is_some_and(|cell| cell == HEADER_SENTINEL);

        let mut seen_urls = HashSet::new();
        if header_present {
            for row in &rows[1..] {
                if let Some(url) = row.get(URL_COLUMN) {
                    if !url.is_empty() {
                        seen_urls.insert(url.clone());
                    }
                }
            }
        }

        Self {
            seen_urls,
            header_present,
        }
    }

    /// Whether a URL was already transferred in a prior run.
    pub fn contains(&self, url: &str) -> bool {
        self.seen_urls.contains(url)
    }

    /// Number of previously transferred URLs.
    pub fn len(&self) -> usize {
        self.seen_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen_urls.is_empty()
    }
}
