//! Sync configuration
//!
//! Document ids, sheet names, and column spans consumed by the pipeline.
//! Defaults mirror the production feed; everything can be overridden from
//! the environment.

use newsclip_common::{NewsclipError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Name of the source sheet holding scraped news rows.
pub const DEFAULT_SOURCE_SHEET: &str = "Yahoo";

/// Column span of the source range (title, url, posted-at, source).
pub const DEFAULT_SOURCE_COLUMNS: &str = "A:D";

/// Column span of the destination range (12 output columns).
pub const DEFAULT_DESTINATION_COLUMNS: &str = "A:L";

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Spreadsheet document holding the source sheet
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Spreadsheet document holding the destination buckets.
    /// Defaults to the source document when unset.
    #[serde(default)]
    pub destination_spreadsheet_id: Option<String>,

    /// Source sheet name
    #[serde(default = "default_source_sheet")]
    pub source_sheet: String,

    /// Source column span
    #[serde(default = "default_source_columns")]
    pub source_columns: String,

    /// Destination column span
    #[serde(default = "default_destination_columns")]
    pub destination_columns: String,

    /// Bearer token for the Sheets API; opaque to this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

fn default_source_sheet() -> String {
    DEFAULT_SOURCE_SHEET.to_string()
}

fn default_source_columns() -> String {
    DEFAULT_SOURCE_COLUMNS.to_string()
}

fn default_destination_columns() -> String {
    DEFAULT_DESTINATION_COLUMNS.to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            destination_spreadsheet_id: None,
            source_sheet: default_source_sheet(),
            source_columns: default_source_columns(),
            destination_columns: default_destination_columns(),
            api_token: None,
        }
    }
}

impl SyncConfig {
    /// Create a config for a single spreadsheet document.
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NEWSCLIP_SPREADSHEET_ID`: source document id
    /// - `NEWSCLIP_DESTINATION_SPREADSHEET_ID`: destination document id
    /// - `NEWSCLIP_SOURCE_SHEET`: source sheet name
    /// - `NEWSCLIP_API_TOKEN`: Sheets API bearer token
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(id) = std::env::var("NEWSCLIP_SPREADSHEET_ID") {
            config.spreadsheet_id = id;
        }

        if let Ok(id) = std::env::var("NEWSCLIP_DESTINATION_SPREADSHEET_ID") {
            config.destination_spreadsheet_id = Some(id);
        }

        if let Ok(sheet) = std::env::var("NEWSCLIP_SOURCE_SHEET") {
            config.source_sheet = sheet;
        }

        if let Ok(token) = std::env::var("NEWSCLIP_API_TOKEN") {
            config.api_token = Some(token);
        }

        Ok(config)
    }

    /// Destination document id, falling back to the source document.
    pub fn destination_spreadsheet_id(&self) -> &str {
        self.destination_spreadsheet_id
            .as_deref()
            .unwrap_or(&self.spreadsheet_id)
    }

    /// Validate the fields required to talk to the Sheets backend.
    pub fn require_backend(&self) -> Result<(&str, &str)> {
        if self.spreadsheet_id.is_empty() {
            return Err(NewsclipError::Config(
                "spreadsheet id is not set (NEWSCLIP_SPREADSHEET_ID)".to_string(),
            ));
        }
        let token = self.api_token.as_deref().ok_or_else(|| {
            NewsclipError::Config("API token is not set (NEWSCLIP_API_TOKEN)".to_string())
        })?;
        Ok((&self.spreadsheet_id, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_production_feed() {
        let config = SyncConfig::default();
        assert_eq!(config.source_sheet, "Yahoo");
        assert_eq!(config.source_columns, "A:D");
        assert_eq!(config.destination_columns, "A:L");
    }

    #[test]
    fn destination_document_falls_back_to_source() {
        let mut config = SyncConfig::new("doc-1");
        assert_eq!(config.destination_spreadsheet_id(), "doc-1");

        config.destination_spreadsheet_id = Some("doc-2".to_string());
        assert_eq!(config.destination_spreadsheet_id(), "doc-2");
    }

    #[test]
    fn backend_validation_requires_id_and_token() {
        let mut config = SyncConfig::default();
        assert!(config.require_backend().is_err());

        config.spreadsheet_id = "doc-1".to_string();
        assert!(config.require_backend().is_err());

        config.api_token = Some("tok".to_string());
        let (id, token) = config.require_backend().unwrap();
        assert_eq!(id, "doc-1");
        assert_eq!(token, "tok");
    }
}
