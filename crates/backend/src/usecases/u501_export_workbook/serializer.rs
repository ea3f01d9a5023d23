use contracts::usecases::u501_export_workbook::WorkbookResult;

use crate::shared::error::SheetsError;

/// Pretty JSON body of the export endpoint (2-space indent)
pub fn serialize(result: &WorkbookResult) -> Result<String, SheetsError> {
    Ok(serde_json::to_string_pretty(result)?)
}
