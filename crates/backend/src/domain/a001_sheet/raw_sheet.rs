use super::cell::Cell;

/// A sheet as read from the host: display name plus the row-major grid.
/// Row 0 is the header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub grid: Vec<Vec<Cell>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, grid: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    /// Pad every row with `Cell::Empty` up to the widest row, the way a
    /// spreadsheet data range is always rectangular.
    pub fn into_rectangular(mut self) -> Self {
        pad_to_rectangle(&mut self.grid);
        self
    }
}

pub fn pad_to_rectangle(grid: &mut [Vec<Cell>]) {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in grid.iter_mut() {
        row.resize(width, Cell::Empty);
    }
}
