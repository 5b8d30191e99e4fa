//! In-memory range store
//!
//! Backs the pipeline in tests and local runs without touching the network.
//! Clones share the same underlying sheets.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use newsclip_common::{NewsclipError, Result};

use super::RangeStore;

type Sheets = BTreeMap<String, Vec<Vec<String>>>;

/// In-process [`RangeStore`] over a shared map of sheets.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: Arc<Mutex<Sheets>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a sheet with rows, replacing any existing content.
    pub fn with_sheet(self, name: &str, rows: Vec<Vec<String>>) -> Self {
        self.lock().insert(name.to_string(), rows);
        self
    }

    /// Snapshot of a sheet's rows; empty when the sheet does not exist.
    pub fn snapshot(&self, name: &str) -> Vec<Vec<String>> {
        self.lock().get(name).cloned().unwrap_or_default()
    }

    /// Whether a sheet exists.
    pub fn has_sheet(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sheets> {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RangeStore for MemoryStore {
    async fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn create_sheet(&self, name: &str) -> Result<()> {
        let mut sheets = self.lock();
        if sheets.contains_key(name) {
            return Err(NewsclipError::BucketAccess {
                bucket: name.to_string(),
                reason: "sheet already exists".to_string(),
            });
        }
        sheets.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn get_range(&self, sheet: &str, _columns: &str) -> Result<Vec<Vec<String>>> {
        // Absent range reads as empty, matching the backend contract.
        Ok(self.lock().get(sheet).cloned().unwrap_or_default())
    }

    async fn append_rows(&self, sheet: &str, _columns: &str, rows: Vec<Vec<String>>) -> Result<()> {
        self.lock().entry(sheet.to_string()).or_default().extend(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn absent_sheet_reads_as_empty() {
        let store = MemoryStore::new();
        assert!(store.get_range("nope", "A:L").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_then_append_then_read() {
        let store = MemoryStore::new();
        store.create_sheet("240315").await.unwrap();
        store
            .append_rows("240315", "A:L", vec![row(&["a", "b"])])
            .await
            .unwrap();
        store
            .append_rows("240315", "A:L", vec![row(&["c"])])
            .await
            .unwrap();

        let rows = store.get_range("240315", "A:L").await.unwrap();
        assert_eq!(rows, vec![row(&["a", "b"]), row(&["c"])]);
    }

    #[tokio::test]
    async fn creating_an_existing_sheet_fails() {
        let store = MemoryStore::new();
        store.create_sheet("240315").await.unwrap();
        assert!(store.create_sheet("240315").await.is_err());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.create_sheet("240315").await.unwrap();

        assert!(store.has_sheet("240315"));
        assert_eq!(store.list_sheets().await.unwrap(), vec!["240315"]);
    }
}
