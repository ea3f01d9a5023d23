pub mod csv_dir;
pub mod google_sheets;
pub mod memory;
pub mod spreadsheet_file;

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::a001_sheet::RawSheet;
use crate::shared::config::{resolve_path, SourceConfig};
use crate::shared::error::SheetsError;

pub use csv_dir::CsvDirSource;
pub use google_sheets::GoogleSheetsSource;
pub use memory::MemorySource;
pub use spreadsheet_file::SpreadsheetFileSource;

/// Доступ к книге на стороне хоста
///
/// Every call reads the host again; implementations keep no snapshot
/// between requests.
#[async_trait]
pub trait WorkbookSource: Send + Sync {
    /// Human readable description for logs
    fn describe(&self) -> String;

    /// Sheet names in the host's tab order
    async fn list_sheets(&self) -> Result<Vec<String>, SheetsError>;

    /// Full grid of one sheet, header row first
    async fn read_sheet(&self, name: &str) -> Result<RawSheet, SheetsError>;
}

/// Build the source selected in config
pub fn build_source(config: &SourceConfig) -> anyhow::Result<Arc<dyn WorkbookSource>> {
    let source: Arc<dyn WorkbookSource> = match config {
        SourceConfig::CsvDir { path } => Arc::new(CsvDirSource::new(resolve_path(path))),
        SourceConfig::SpreadsheetFile { path } => {
            Arc::new(SpreadsheetFileSource::new(resolve_path(path)))
        }
        SourceConfig::GoogleSheets {
            spreadsheet_id,
            api_key,
            access_token,
            base_url,
            timeout_secs,
        } => {
            if api_key.is_none() && access_token.is_none() {
                tracing::warn!(
                    "Google Sheets source has neither api_key nor access_token; only public sheets will be readable"
                );
            }
            Arc::new(GoogleSheetsSource::new(
                spreadsheet_id.clone(),
                api_key.clone(),
                access_token.clone(),
                base_url.clone(),
                std::time::Duration::from_secs(*timeout_secs),
            )?)
        }
    };

    tracing::info!("Workbook source: {}", source.describe());
    Ok(source)
}
