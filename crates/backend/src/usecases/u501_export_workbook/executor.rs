use contracts::usecases::u501_export_workbook::WorkbookResult;

use crate::domain::a001_sheet::{self, ConvertOptions};
use crate::shared::error::SheetsError;
use crate::shared::sources::WorkbookSource;

/// Собирает все листы книги
///
/// Sheets come back in the source's order, including sheets whose rows were
/// all filtered out. The first sheet that fails aborts the whole export.
pub async fn aggregate(
    source: &dyn WorkbookSource,
    options: &ConvertOptions,
) -> Result<WorkbookResult, SheetsError> {
    let names = source.list_sheets().await?;

    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        let raw = source.read_sheet(name).await.map_err(|e| {
            tracing::warn!("Failed to read sheet '{}': {}", name, e);
            e
        })?;
        sheets.push(a001_sheet::convert(&raw, options));
    }

    let total_rows: usize = sheets.iter().map(|s| s.rows.len()).sum();
    tracing::info!(
        "Exported {} sheets, {} enabled rows from {}",
        sheets.len(),
        total_rows,
        source.describe()
    );

    Ok(WorkbookResult { sheets })
}
