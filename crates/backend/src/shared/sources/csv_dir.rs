use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::WorkbookSource;
use crate::domain::a001_sheet::{Cell, RawSheet};
use crate::shared::error::SheetsError;

/// Directory of CSV files, one sheet per file
///
/// Sheet name is the file stem, sheet order is file name order. Files whose
/// stems collide (`Items.csv` next to `Items.CSV`) are named by their full
/// file name instead, so every file stays a distinct sheet.
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl WorkbookSource for CsvDirSource {
    fn describe(&self) -> String {
        format!("CSV directory {}", self.dir.display())
    }

    async fn list_sheets(&self) -> Result<Vec<String>, SheetsError> {
        let dir = self.dir.clone();
        run_blocking(move || sheet_files(&dir))
            .await
            .map(|files| files.into_iter().map(|(name, _)| name).collect())
    }

    async fn read_sheet(&self, name: &str) -> Result<RawSheet, SheetsError> {
        let dir = self.dir.clone();
        let name = name.to_string();
        run_blocking(move || {
            let path = sheet_files(&dir)?
                .into_iter()
                .find_map(|(sheet, path)| (sheet == name).then_some(path))
                .ok_or_else(|| SheetsError::SheetNotFound(name.clone()))?;
            read_csv_sheet(&name, &path)
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, SheetsError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, SheetsError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| SheetsError::host_access("CSV reader task failed", e))?
}

/// `(sheet name, path)` of every `*.csv` file, sorted by file name
fn sheet_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, SheetsError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| SheetsError::host_access(&format!("Cannot read {}", dir.display()), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| SheetsError::host_access(&format!("Cannot read {}", dir.display()), e))?;
        let path = entry.path();

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.push((stem.to_string(), path.clone()));
        }
    }

    files.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for (stem, _) in &files {
        *stem_counts.entry(stem.clone()).or_default() += 1;
    }

    Ok(files
        .into_iter()
        .map(|(stem, path)| {
            if stem_counts[&stem] > 1 {
                let file_name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
                    .unwrap_or(stem);
                (file_name, path)
            } else {
                (stem, path)
            }
        })
        .collect())
}

fn read_csv_sheet(name: &str, path: &Path) -> Result<RawSheet, SheetsError> {
    let bytes = std::fs::read(path)
        .map_err(|e| SheetsError::host_access(&format!("Cannot read {}", path.display()), e))?;
    let text = String::from_utf8(bytes).map_err(|e| SheetsError::parse(name, e))?;

    parse_csv(name, &text)
}

pub fn parse_csv(name: &str, csv_text: &str) -> Result<RawSheet, SheetsError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SheetsError::parse(name, e))?;
        grid.push(record.iter().map(parse_field).collect());
    }

    Ok(RawSheet::new(name, grid).into_rectangular())
}

/// Typing rules for a raw CSV field
pub fn parse_field(field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Empty;
    }
    if field.eq_ignore_ascii_case("true") {
        return Cell::Boolean(true);
    }
    if field.eq_ignore_ascii_case("false") {
        return Cell::Boolean(false);
    }
    if let Ok(n) = field.parse::<f64>() {
        if n.is_finite() {
            return Cell::Number(n);
        }
    }
    if let Some(dt) = parse_date(field) {
        return Cell::Date(dt);
    }
    Cell::Text(field.to_string())
}

fn parse_date(field: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(field, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
