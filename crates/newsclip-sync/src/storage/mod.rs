//! Storage backends
//!
//! The pipeline talks to tabular storage only through [`RangeStore`]: named
//! sheets of ragged string rows, read as whole column ranges and written by
//! appending. [`sheets::SheetsClient`] is the production backend (Google
//! Sheets REST v4); [`memory::MemoryStore`] backs tests and local
//! inspection.

pub mod memory;
pub mod sheets;

pub use memory::MemoryStore;
pub use sheets::SheetsClient;

use async_trait::async_trait;
use newsclip_common::Result;

/// A key-value range store over named sheets.
///
/// Rows are sequences of string cells and may be ragged. Reading an absent
/// range yields an empty sequence rather than an error.
#[async_trait]
pub trait RangeStore: Send + Sync {
    /// Names of existing sheets.
    async fn list_sheets(&self) -> Result<Vec<String>>;

    /// Create a sheet. Fails loudly if the backend rejects the request.
    async fn create_sheet(&self, name: &str) -> Result<()>;

    /// Read all rows of a column range, e.g. columns `"A:D"` of `sheet`.
    async fn get_range(&self, sheet: &str, columns: &str) -> Result<Vec<Vec<String>>>;

    /// Append rows after the existing content of a column range.
    async fn append_rows(&self, sheet: &str, columns: &str, rows: Vec<Vec<String>>) -> Result<()>;
}
