use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::WorkbookSource;
use crate::domain::a001_sheet::{Cell, RawSheet};
use crate::shared::error::SheetsError;

/// HTTP-клиент для Google Sheets API v4
pub struct GoogleSheetsSource {
    client: reqwest::Client,
    spreadsheet_id: String,
    api_key: Option<String>,
    access_token: Option<String>,
    base_url: String,
}

impl GoogleSheetsSource {
    pub fn new(
        spreadsheet_id: String,
        api_key: Option<String>,
        access_token: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            spreadsheet_id,
            api_key,
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id)
        )
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        sheet: &str,
    ) -> Result<T, SheetsError> {
        let mut request = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("Google Sheets request: GET {}", url);

        let response = request
            .send()
            .await
            .map_err(|e| SheetsError::host_access("Google Sheets request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(500).collect();
            tracing::error!("Google Sheets API returned {}: {}", status, preview);
            return Err(SheetsError::HostAccess(format!(
                "Google Sheets API returned {}: {}",
                status, preview
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SheetsError::host_access("Failed to read Google Sheets response", e))?;

        serde_json::from_str::<T>(&body).map_err(|e| SheetsError::parse(sheet, e))
    }
}

#[async_trait]
impl WorkbookSource for GoogleSheetsSource {
    fn describe(&self) -> String {
        format!("Google spreadsheet {}", self.spreadsheet_id)
    }

    async fn list_sheets(&self) -> Result<Vec<String>, SheetsError> {
        let meta: SpreadsheetMeta = self
            .get_json(
                &self.spreadsheet_url(),
                &[("fields", "sheets.properties(title,index)")],
                "spreadsheet metadata",
            )
            .await?;

        Ok(meta.into_sheet_names())
    }

    async fn read_sheet(&self, name: &str) -> Result<RawSheet, SheetsError> {
        let url = format!(
            "{}/values/{}",
            self.spreadsheet_url(),
            urlencoding::encode(&quote_sheet_range(name))
        );
        let values: ValueRange = self
            .get_json(
                &url,
                &[
                    ("valueRenderOption", "UNFORMATTED_VALUE"),
                    ("dateTimeRenderOption", "FORMATTED_STRING"),
                    ("majorDimension", "ROWS"),
                ],
                name,
            )
            .await?;

        let grid = values
            .values
            .iter()
            .map(|row| row.iter().map(cell_from_json).collect())
            .collect();

        // API обрезает пустые ячейки в конце строк
        Ok(RawSheet::new(name, grid).into_rectangular())
    }
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
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
    #[serde(default)]
    index: i64,
}

impl SpreadsheetMeta {
    fn into_sheet_names(self) -> Vec<String> {
        let mut props: Vec<SheetProperties> =
            self.sheets.into_iter().map(|s| s.properties).collect();
        props.sort_by_key(|p| p.index);
        props.into_iter().map(|p| p.title).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// A1 range covering a whole sheet: `'Sheet name'`, inner quotes doubled
fn quote_sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_from_json(value: &serde_json::Value) -> Cell {
    use serde_json::Value;

    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Boolean(*b),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
        Value::String(s) if s.is_empty() => Cell::Empty,
        Value::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}
