//! Google Sheets range-store backend
//!
//! Thin client over the Sheets REST v4 values API. The bearer token is
//! opaque configuration; acquiring or refreshing it happens outside this
//! crate. No retries: every failed call surfaces as a fatal error and the
//! run aborts.

use async_trait::async_trait;
use newsclip_common::{NewsclipError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::RangeStore;

// ============================================================================
// Sheets API Constants
// ============================================================================

/// Production endpoint of the Sheets REST API.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Default timeout for Sheets API requests in seconds.
/// Can be overridden via NEWSCLIP_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// [`RangeStore`] backed by one Google Sheets document.
pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl SheetsClient {
    /// Create a client for a spreadsheet document.
    pub fn new(spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(SHEETS_API_BASE, spreadsheet_id, token)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let timeout_secs = std::env::var("NEWSCLIP_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(network)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            spreadsheet_id: spreadsheet_id.into(),
            token: token.into(),
        })
    }

    /// The document this client is bound to.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// A1-notation range for a whole column span of a sheet.
    fn range(sheet: &str, columns: &str) -> String {
        format!("'{}'!{}", sheet, columns)
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range),
            suffix
        )
    }
}

fn network(err: reqwest::Error) -> NewsclipError {
    NewsclipError::Network(err.to_string())
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SpreadsheetInfo {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[async_trait]
impl RangeStore for SheetsClient {
    async fn list_sheets(&self) -> Result<Vec<String>> {
        let url = format!(
            "{}/spreadsheets/{}?fields=sheets.properties.title",
            self.base_url, self.spreadsheet_id
        );

        let info: SpreadsheetInfo = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?
            .json()
            .await
            .map_err(network)?;

        Ok(info.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn create_sheet(&self, name: &str) -> Result<()> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = serde_json::json!({
            "requests": [{ "addSheet": { "properties": { "title": name } } }]
        });

        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?;

        Ok(())
    }

    async fn get_range(&self, sheet: &str, columns: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(&Self::range(sheet, columns), "");

        let range: ValueRange = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?
            .json()
            .await
            .map_err(network)?;

        Ok(range.values)
    }

    async fn append_rows(&self, sheet: &str, columns: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let url = self.values_url(
            &Self::range(sheet, columns),
            ":append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
        );
        let body = serde_json::json!({ "values": rows });

        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> SheetsClient {
        SheetsClient::with_base_url(server.uri(), "doc-1", "test-token").unwrap()
    }

    #[tokio::test]
    async fn list_sheets_extracts_titles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spreadsheets/doc-1"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sheets": [
                    { "properties": { "title": "Yahoo" } },
                    { "properties": { "title": "240315" } }
                ]
            })))
            .mount(&server)
            .await;

        let sheets = client(&server).await.list_sheets().await.unwrap();
        assert_eq!(sheets, vec!["Yahoo", "240315"]);
    }

    #[tokio::test]
    async fn get_range_returns_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/spreadsheets/doc-1/values/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "'Yahoo'!A1:D2",
                "values": [["title", "url", "posted", "source"], ["a", "b"]]
            })))
            .mount(&server)
            .await;

        let rows = client(&server).await.get_range("Yahoo", "A:D").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn absent_range_reads_as_empty() {
        let server = MockServer::start().await;
        // values.get omits the "values" key entirely for an empty range
        Mock::given(method("GET"))
            .and(path_regex(r"^/spreadsheets/doc-1/values/.+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "'240315'!A1:L1"
            })))
            .mount(&server)
            .await;

        let rows = client(&server).await.get_range("240315", "A:L").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn append_sends_user_entered_insert_rows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/spreadsheets/doc-1/values/.+:append$"))
            .and(query_param("valueInputOption", "USER_ENTERED"))
            .and(query_param("insertDataOption", "INSERT_ROWS"))
            .and(body_json(serde_json::json!({ "values": [["a", "b"]] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .append_rows("240315", "A:L", vec![vec!["a".to_string(), "b".to_string()]])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_sheet_posts_add_sheet_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/spreadsheets/doc-1:batchUpdate"))
            .and(body_json(serde_json::json!({
                "requests": [{ "addSheet": { "properties": { "title": "240315" } } }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).await.create_sheet("240315").await.unwrap();
    }

    #[tokio::test]
    async fn http_errors_surface_as_network_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/spreadsheets/doc-1/values/.+$"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server).await.get_range("Yahoo", "A:D").await.unwrap_err();
        assert!(matches!(err, NewsclipError::Network(_)));
    }
}
