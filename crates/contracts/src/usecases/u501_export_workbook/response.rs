use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One data row keyed by the sheet's header cells.
///
/// Keys keep column order. A repeated header name keeps the position of its
/// first occurrence and the value of its last.
pub type Record = IndexMap<String, String>;

/// Enabled rows of a single sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetResult {
    #[serde(rename = "sheetName")]
    pub sheet_name: String,

    pub rows: Vec<Record>,
}

impl SheetResult {
    pub fn empty(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows: Vec::new(),
        }
    }
}

/// Full payload of the export endpoint, one entry per sheet in tab order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkbookResult {
    pub sheets: Vec<SheetResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_result_uses_camel_case_name() {
        let mut row = Record::new();
        row.insert("Name".to_string(), "a".to_string());
        let sheet = SheetResult {
            sheet_name: "Items".to_string(),
            rows: vec![row],
        };

        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["sheetName"], "Items");
        assert_eq!(json["rows"][0]["Name"], "a");
        assert!(json.get("sheet_name").is_none());
    }

    #[test]
    fn test_record_keeps_column_order() {
        let mut row = Record::new();
        row.insert("Zeta".to_string(), "1".to_string());
        row.insert("Alpha".to_string(), "2".to_string());
        row.insert("Mid".to_string(), "3".to_string());

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Zeta":"1","Alpha":"2","Mid":"3"}"#);
    }

    #[test]
    fn test_empty_workbook_serializes_sheets_array() {
        let json = serde_json::to_string(&WorkbookResult::default()).unwrap();
        assert_eq!(json, r#"{"sheets":[]}"#);
    }
}
