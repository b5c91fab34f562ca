//! Row records: one data row plus the address it was read from.

use std::fmt;

use crate::cell::CellValue;

/// A single row of cell values and the cell at which the row begins.
///
/// `start_range` is derived as `"A" + (index + 1)` from the row's index in the
/// grid it was read from, so the first data row under a header is `"A2"`.
/// Callers may override it; the override is not checked against `cells`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    cells: Vec<CellValue>,
    start_range: String,
}

impl RowRecord {
    /// Create a row for grid index `index` (0-based).
    pub fn new(cells: Vec<CellValue>, index: usize) -> Self {
        Self {
            cells,
            start_range: start_range_for(index),
        }
    }

    /// Replace the derived start address.
    pub fn with_start_range(mut self, start_range: impl Into<String>) -> Self {
        self.start_range = start_range.into();
        self
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut Vec<CellValue> {
        &mut self.cells
    }

    pub fn set_cells(&mut self, cells: Vec<CellValue>) {
        self.cells = cells;
    }

    pub fn into_cells(self) -> Vec<CellValue> {
        self.cells
    }

    pub fn start_range(&self) -> &str {
        &self.start_range
    }

    pub fn set_start_range(&mut self, start_range: impl Into<String>) {
        self.start_range = start_range.into();
    }

    /// 1-based sheet row number, if `start_range` still has the `A<n>` form.
    pub fn row_number(&self) -> Option<usize> {
        self.start_range
            .strip_prefix('A')
            .and_then(|n| n.parse().ok())
    }
}

impl From<Vec<CellValue>> for RowRecord {
    fn from(cells: Vec<CellValue>) -> Self {
        Self::new(cells, 0)
    }
}

impl fmt::Display for RowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowRecord[cells=[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "], start_range={}]", self.start_range)
    }
}

fn start_range_for(index: usize) -> String {
    format!("A{}", index + 1)
}
