use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::PathBuf;

use super::WorkbookSource;
use crate::domain::a001_sheet::{Cell, RawSheet};
use crate::shared::error::SheetsError;

/// Workbook file readable by calamine (xlsx, xlsm, xlsb, xls, ods)
///
/// The file is reopened on every call, so edits show up on the next request.
pub struct SpreadsheetFileSource {
    path: PathBuf,
}

impl SpreadsheetFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WorkbookSource for SpreadsheetFileSource {
    fn describe(&self) -> String {
        format!("spreadsheet file {}", self.path.display())
    }

    async fn list_sheets(&self) -> Result<Vec<String>, SheetsError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<String>, SheetsError> {
            let workbook = open_workbook_auto(&path).map_err(|e| {
                SheetsError::host_access(&format!("Cannot open {}", path.display()), e)
            })?;
            Ok(workbook.sheet_names())
        })
        .await
        .map_err(|e| SheetsError::host_access("Workbook reader task failed", e))?
    }

    async fn read_sheet(&self, name: &str) -> Result<RawSheet, SheetsError> {
        let path = self.path.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || -> Result<RawSheet, SheetsError> {
            let mut workbook = open_workbook_auto(&path).map_err(|e| {
                SheetsError::host_access(&format!("Cannot open {}", path.display()), e)
            })?;

            if !workbook.sheet_names().iter().any(|s| *s == name) {
                return Err(SheetsError::SheetNotFound(name));
            }

            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| SheetsError::parse(&name, e))?;

            Ok(RawSheet::new(name, grid_from_range(&range)))
        })
        .await
        .map_err(|e| SheetsError::host_access("Workbook reader task failed", e))?
    }
}

/// Rectangular grid anchored at A1
///
/// calamine trims leading empty rows and columns from the used range; they
/// are restored as `Cell::Empty` so column positions match the sheet.
pub fn grid_from_range(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut grid = vec![vec![Cell::Empty; end_col as usize + 1]; end_row as usize + 1];
    for (row, col, data) in range.cells() {
        grid[start_row as usize + row][start_col as usize + col] = cell_from_data(data);
    }
    grid
}

pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Boolean(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_sheet::ConvertOptions;
    use crate::usecases::u501_export_workbook::aggregate;
    use calamine::CellErrorType;
    use rust_xlsxwriter::Workbook;

    /// Two sheets in tab order `Zed`, `Alpha`. `Zed` starts at A1 with a
    /// blank B1 header, `Alpha` has its used range at B2:D3.
    fn write_workbook(path: &std::path::Path) {
        let mut workbook = Workbook::new();

        let zed = workbook.add_worksheet();
        zed.set_name("Zed").unwrap();
        zed.write_string(0, 0, "Name").unwrap();
        zed.write_string(0, 2, "Enabled").unwrap();
        zed.write_string(1, 0, "a").unwrap();
        zed.write_number(1, 1, 42.0).unwrap();
        zed.write_boolean(1, 2, true).unwrap();
        zed.write_string(2, 0, "b").unwrap();
        zed.write_number(2, 1, 7.5).unwrap();
        zed.write_boolean(2, 2, false).unwrap();

        let alpha = workbook.add_worksheet();
        alpha.set_name("Alpha").unwrap();
        alpha.write_string(1, 1, "Name").unwrap();
        alpha.write_string(1, 2, "Value").unwrap();
        alpha.write_string(1, 3, "Enabled").unwrap();
        alpha.write_string(2, 1, "c").unwrap();
        alpha.write_number(2, 2, 1.0).unwrap();
        alpha.write_boolean(2, 3, true).unwrap();

        workbook.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_reads_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_workbook(&path);

        let source = SpreadsheetFileSource::new(&path);
        assert_eq!(source.list_sheets().await.unwrap(), vec!["Zed", "Alpha"]);

        let alpha = source.read_sheet("Alpha").await.unwrap();
        assert_eq!(alpha.grid.len(), 3);
        assert!(alpha.grid.iter().all(|row| row.len() == 4));
        assert_eq!(alpha.grid[0], vec![Cell::Empty; 4]);
        assert_eq!(alpha.grid[1][1], Cell::from("Name"));
        assert_eq!(alpha.grid[2][3], Cell::Boolean(true));

        let err = source.read_sheet("Missing").await.unwrap_err();
        assert!(matches!(err, SheetsError::SheetNotFound(_)));
    }

    #[tokio::test]
    async fn test_xlsx_export_through_converter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        write_workbook(&path);

        let source = SpreadsheetFileSource::new(&path);
        let result = aggregate(&source, &ConvertOptions::default()).await.unwrap();

        assert_eq!(result.sheets.len(), 2);
        let zed = &result.sheets[0];
        assert_eq!(zed.sheet_name, "Zed");
        assert_eq!(zed.rows.len(), 1);
        let keys: Vec<&str> = zed.rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Name", "", "Enabled"]);
        assert_eq!(zed.rows[0]["Name"], "a");
        assert_eq!(zed.rows[0][""], "42");
        assert_eq!(zed.rows[0]["Enabled"], "true");

        // header row of Alpha is the blank first row
        let alpha = &result.sheets[1];
        assert_eq!(alpha.sheet_name, "Alpha");
        assert!(alpha.rows.is_empty());
    }

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::String("a".into())), Cell::from("a"));
        assert_eq!(cell_from_data(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Boolean(true));
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2024-01-01T10:00:00".into())),
            Cell::from("2024-01-01T10:00:00")
        );
        assert_eq!(
            cell_from_data(&Data::Error(CellErrorType::Div0)),
            Cell::from("#DIV/0!")
        );
    }

    #[test]
    fn test_grid_is_anchored_at_a1() {
        // used range B2:C3
        let mut range: Range<Data> = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("Name".into()));
        range.set_value((1, 2), Data::String("Enabled".into()));
        range.set_value((2, 1), Data::String("a".into()));
        range.set_value((2, 2), Data::Bool(true));

        let grid = grid_from_range(&range);

        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 3));
        assert_eq!(grid[0], vec![Cell::Empty, Cell::Empty, Cell::Empty]);
        assert_eq!(grid[1][0], Cell::Empty);
        assert_eq!(grid[1][1], Cell::from("Name"));
        assert_eq!(grid[2][2], Cell::Boolean(true));
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_host_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = SpreadsheetFileSource::new(dir.path().join("absent.xlsx"));

        let err = source.list_sheets().await.unwrap_err();
        assert!(matches!(err, SheetsError::HostAccess(_)));
    }
}
