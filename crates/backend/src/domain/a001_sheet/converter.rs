use contracts::usecases::u501_export_workbook::{Record, SheetResult};
use serde::Deserialize;

use super::cell::Cell;
use super::raw_sheet::RawSheet;

/// Zero-based index of the enable flag column ("C")
pub const DEFAULT_ENABLED_COLUMN: usize = 2;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertOptions {
    pub enabled_column: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            enabled_column: DEFAULT_ENABLED_COLUMN,
        }
    }
}

/// Конвертирует лист в набор записей
///
/// Первая строка - заголовки. Остаются только строки, у которых в колонке
/// флага лежит именно булево `true`; всё остальное молча отбрасывается.
pub fn convert(sheet: &RawSheet, options: &ConvertOptions) -> SheetResult {
    let mut rows = sheet.grid.iter();

    let Some(header) = rows.next() else {
        tracing::debug!("Sheet '{}' has no header row", sheet.name);
        return SheetResult::empty(&sheet.name);
    };

    let keys: Vec<String> = header.iter().map(Cell::to_display_string).collect();

    let records: Vec<Record> = rows
        .filter(|row| is_enabled(row, options.enabled_column))
        .map(|row| to_record(&keys, row))
        .collect();

    tracing::debug!(
        "Sheet '{}': {} of {} data rows enabled",
        sheet.name,
        records.len(),
        sheet.grid.len() - 1
    );

    SheetResult {
        sheet_name: sheet.name.clone(),
        rows: records,
    }
}

fn is_enabled(row: &[Cell], enabled_column: usize) -> bool {
    row.get(enabled_column).is_some_and(Cell::is_true)
}

/// Positional pairing stops at whichever side is shorter.
fn to_record(keys: &[String], row: &[Cell]) -> Record {
    let mut record = Record::with_capacity(keys.len().min(row.len()));
    for (key, cell) in keys.iter().zip(row) {
        record.insert(key.clone(), cell.to_display_string());
    }
    record
}
