use async_trait::async_trait;

use super::WorkbookSource;
use crate::domain::a001_sheet::RawSheet;
use crate::shared::error::SheetsError;

/// Workbook held in memory
///
/// Grids are padded to rectangles on construction, like every other host.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<RawSheet>,
}

impl MemorySource {
    pub fn new(sheets: Vec<RawSheet>) -> Self {
        Self {
            sheets: sheets.into_iter().map(RawSheet::into_rectangular).collect(),
        }
    }
}

#[async_trait]
impl WorkbookSource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory workbook ({} sheets)", self.sheets.len())
    }

    async fn list_sheets(&self) -> Result<Vec<String>, SheetsError> {
        Ok(self.sheets.iter().map(|s| s.name.clone()).collect())
    }

    async fn read_sheet(&self, name: &str) -> Result<RawSheet, SheetsError> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| SheetsError::SheetNotFound(name.to_string()))
    }
}
